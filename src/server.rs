use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use notify::{Event, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tower_http::services::ServeDir;
use tower_livereload::LiveReloadLayer;

use crate::content::SiteContent;
use crate::gemini::{ConversationReply, ConversationRequest, TextGenerator};
use crate::site_writer::SiteWriter;

/// Path of the chat endpoint
pub const CHAT_ROUTE: &str = "/api/chat";

/// Settings for [`serve`]
#[derive(Debug, Clone)]
pub struct ServeOptions {
    /// Directory the site is generated into and served from
    pub output: PathBuf,
    /// Optional YAML content override, watched for changes
    pub content: Option<PathBuf>,
    /// Directory holding the wasm-bindgen output, served under `/pkg`
    pub pkg: PathBuf,
    pub port: u16,
}

/// Generate the site from the content file (or the built-in copy)
pub fn regenerate(content: Option<&Path>, output: &Path) -> anyhow::Result<SiteContent> {
    let site = SiteContent::load(content)?;
    SiteWriter::new().write(&site, output)?;
    Ok(site)
}

async fn chat<G: TextGenerator>(
    State(generator): State<Arc<G>>,
    Json(request): Json<ConversationRequest>,
) -> Result<Json<ConversationReply>, StatusCode> {
    if request.message.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    tracing::debug!(history = request.recent_history().len(), "chat request");
    let text = generator.generate(&request).await;
    Ok(Json(ConversationReply { text }))
}

/// Router serving the generated site, the wasm package and the chat endpoint
pub fn app<G: TextGenerator>(output: &Path, pkg: &Path, generator: Arc<G>) -> Router {
    Router::new()
        .route(CHAT_ROUTE, post(chat::<G>))
        .nest_service("/pkg", ServeDir::new(pkg))
        .fallback_service(ServeDir::new(output))
        .with_state(generator)
}

/// Start the development server with hot reload
pub async fn serve<G: TextGenerator>(options: ServeOptions, generator: G) -> anyhow::Result<()> {
    let ServeOptions {
        output,
        content,
        pkg,
        port,
    } = options;

    // Generate initial site
    regenerate(content.as_deref(), &output)?;
    tracing::info!(output = %output.display(), "generated site");

    if !pkg.join("phitopolis_viz.js").exists() {
        tracing::warn!(
            pkg = %pkg.display(),
            "wasm package not found; build it with `wasm-pack build phitopolis-viz --target web`"
        );
    }

    // Keep the content watcher alive for the lifetime of the server
    let _content_watcher = match &content {
        Some(path) => Some(watch_content(path, &output)?),
        None => None,
    };

    // Create live reload layer
    let livereload = LiveReloadLayer::new();
    let reloader = livereload.reloader();

    // Set up file watcher for output directory to trigger browser reload
    let mut output_watcher = notify::recommended_watcher(move |res: Result<Event, _>| {
        if let Ok(event) = res {
            if event.kind.is_modify() || event.kind.is_create() {
                reloader.reload();
            }
        }
    })?;
    output_watcher.watch(&output, RecursiveMode::Recursive)?;

    let router = app(&output, &pkg, Arc::new(generator)).layer(livereload);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("development server running at http://localhost:{port}");
    if let Some(path) = &content {
        tracing::info!("watching {} for changes", path.display());
    }

    axum::serve(listener, router).await?;

    Ok(())
}

/// Regenerate the site whenever the content file changes
fn watch_content(content: &Path, output: &Path) -> anyhow::Result<notify::RecommendedWatcher> {
    let (tx, mut rx) = mpsc::channel::<()>(1);

    let file_name = content.file_name().map(|n| n.to_os_string());
    let mut watcher = notify::recommended_watcher(move |res: Result<Event, _>| {
        if let Ok(event) = res {
            let relevant = event
                .paths
                .iter()
                .any(|p| p.file_name().map(|n| n.to_os_string()) == file_name);
            if relevant && (event.kind.is_modify() || event.kind.is_create()) {
                // A full channel already means a regeneration is pending
                let _ = tx.try_send(());
            }
        }
    })?;

    // Watch the parent directory so editors that replace the file are seen
    let watch_path = content
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    watcher.watch(&watch_path, RecursiveMode::NonRecursive)?;

    let content = content.to_path_buf();
    let output = output.to_path_buf();
    tokio::spawn(async move {
        while rx.recv().await.is_some() {
            // Debounce: wait a bit for rapid changes to settle
            tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

            // Drain any additional notifications
            while rx.try_recv().is_ok() {}

            match regenerate(Some(&content), &output) {
                Ok(_) => tracing::info!("regenerated site"),
                Err(e) => tracing::error!(error = %e, "error regenerating site"),
            }
        }
    });

    Ok(watcher)
}
