use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use phitopolis::gemini::{self, GeminiClient};
use phitopolis::server::{self, ServeOptions};

/// Site generator and development server for the Phitopolis site.
#[derive(Parser)]
#[command(name = "phitopolis")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the static site
    Generate {
        /// Output directory for the generated site
        #[arg(short, long, default_value = "output")]
        output: PathBuf,

        /// YAML file overriding the built-in site content
        #[arg(short, long)]
        content: Option<PathBuf>,
    },
    /// Start development server with hot reload and the chat endpoint
    Serve {
        /// Output directory for the generated site
        #[arg(short, long, default_value = "output")]
        output: PathBuf,

        /// YAML file overriding the built-in site content
        #[arg(short, long)]
        content: Option<PathBuf>,

        /// Port to run the server on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Directory containing the wasm-pack output for phitopolis-viz
        #[arg(long, default_value = "phitopolis-viz/pkg")]
        pkg: PathBuf,

        /// Gemini model used by the chat assistant
        #[arg(long, default_value = gemini::DEFAULT_MODEL)]
        model: String,

        /// Base URL of the Gemini API
        #[arg(long, default_value = gemini::DEFAULT_BASE_URL)]
        gemini_url: String,

        /// Gemini API key; without one the assistant answers with a fallback
        #[arg(long, env = "API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// Timeout for each Gemini request, in seconds
        #[arg(long, default_value = "30")]
        timeout: u64,
    },
}

fn generate(content: Option<&Path>, output: &Path) -> anyhow::Result<()> {
    let site = server::regenerate(content, output)?;
    tracing::info!(
        company = %site.company,
        jobs = site.careers.jobs.len(),
        "generated site in {}",
        output.display()
    );
    Ok(())
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("phitopolis=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { output, content } => {
            generate(content.as_deref(), &output)?;
        }
        Commands::Serve {
            output,
            content,
            port,
            pkg,
            model,
            gemini_url,
            api_key,
            timeout,
        } => {
            let client = GeminiClient::with_options(
                api_key,
                &model,
                &gemini_url,
                Duration::from_secs(timeout),
            );
            if !client.has_api_key() {
                tracing::warn!("no API_KEY set; the assistant will reply with a fallback message");
            }

            let options = ServeOptions {
                output,
                content,
                pkg,
                port,
            };
            server::serve(options, client).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_generate_with_defaults() {
        let cli = Cli::try_parse_from(["phitopolis", "generate"]).unwrap();
        match cli.command {
            Commands::Generate { output, content } => {
                assert_eq!(output, PathBuf::from("output"));
                assert!(content.is_none());
            }
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn cli_parses_generate_with_content() {
        let cli = Cli::try_parse_from([
            "phitopolis",
            "generate",
            "--output",
            "site",
            "--content",
            "content.yaml",
        ])
        .unwrap();
        match cli.command {
            Commands::Generate { output, content } => {
                assert_eq!(output, PathBuf::from("site"));
                assert_eq!(content, Some(PathBuf::from("content.yaml")));
            }
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn cli_parses_serve_subcommand() {
        let cli = Cli::try_parse_from([
            "phitopolis",
            "serve",
            "--port",
            "8080",
            "--model",
            "gemini-test",
            "--api-key",
            "secret",
        ])
        .unwrap();
        match cli.command {
            Commands::Serve {
                port,
                pkg,
                model,
                gemini_url,
                api_key,
                timeout,
                ..
            } => {
                assert_eq!(port, 8080);
                assert_eq!(pkg, PathBuf::from("phitopolis-viz/pkg"));
                assert_eq!(model, "gemini-test");
                assert_eq!(gemini_url, gemini::DEFAULT_BASE_URL);
                assert_eq!(api_key.as_deref(), Some("secret"));
                assert_eq!(timeout, 30);
            }
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn cli_requires_a_subcommand() {
        assert!(Cli::try_parse_from(["phitopolis"]).is_err());
    }
}
