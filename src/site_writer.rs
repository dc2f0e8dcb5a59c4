//! Site Writer
//!
//! Renders [`SiteContent`] into a static page: `index.html`, `site.css` and
//! `boot.js`. The compiled `phitopolis-viz` package is served separately
//! under `/pkg`.

use std::fs;
use std::path::{Path, PathBuf};

use askama::Template;
use thiserror::Error;

use crate::content::{Card, JobPosition, SiteContent};

/// Stylesheet written next to `index.html`
const SITE_CSS: &str = include_str!("../assets/site.css");

/// Module script that loads the wasm package and calls `boot()`
const BOOT_JS: &str = include_str!("../assets/boot.js");

/// Errors that can occur while writing the site
#[derive(Error, Debug)]
pub enum SiteError {
    /// An I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Template rendering failed
    #[error("render error: {0}")]
    Render(#[from] askama::Error),
}

/// Result type for site generation
pub type SiteResult<T> = Result<T, SiteError>;

/// A navigation entry in the header
struct NavLink {
    page: &'static str,
    label: &'static str,
}

const NAV_LINKS: &[NavLink] = &[
    NavLink {
        page: "home",
        label: "Home",
    },
    NavLink {
        page: "expertise",
        label: "Expertise",
    },
    NavLink {
        page: "careers",
        label: "Careers",
    },
];

/// A career tab button and the panel it shows
struct TabRef {
    id: &'static str,
    label: &'static str,
}

const CAREER_TABS: &[TabRef] = &[
    TabRef {
        id: "open-roles",
        label: "Open Roles",
    },
    TabRef {
        id: "tech-stack",
        label: "Tech Stack",
    },
    TabRef {
        id: "life",
        label: "Life at Phitopolis",
    },
    TabRef {
        id: "graduate",
        label: "Graduate Program",
    },
];

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate<'a> {
    content: &'a SiteContent,
    nav: &'a [NavLink],
    tabs: &'a [TabRef],
    jobs: &'a [JobPosition],
    tech_stack: &'a [Card],
    /// Ticker items repeated so the marquee loops without a gap
    ticker: Vec<&'a str>,
    year: i32,
}

/// Writer for the static site
pub struct SiteWriter {
    /// Copyright year shown in the footer
    pub year: i32,
}

impl Default for SiteWriter {
    fn default() -> Self {
        Self { year: 2025 }
    }
}

impl SiteWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the footer year
    pub fn with_year(year: i32) -> Self {
        Self { year }
    }

    /// Render the page markup
    pub fn render_index(&self, content: &SiteContent) -> SiteResult<String> {
        let ticker = content
            .ticker
            .iter()
            .chain(content.ticker.iter())
            .map(String::as_str)
            .collect();

        let template = IndexTemplate {
            content,
            nav: NAV_LINKS,
            tabs: CAREER_TABS,
            jobs: &content.careers.jobs,
            tech_stack: &content.careers.tech_stack,
            ticker,
            year: self.year,
        };
        Ok(template.render()?)
    }

    /// Write every file into `output`, creating it if needed.
    ///
    /// Returns the paths written.
    pub fn write(&self, content: &SiteContent, output: &Path) -> SiteResult<Vec<PathBuf>> {
        fs::create_dir_all(output)?;

        let html = self.render_index(content)?;
        let files = [
            ("index.html", html.as_str()),
            ("site.css", SITE_CSS),
            ("boot.js", BOOT_JS),
        ];

        let mut written = Vec::with_capacity(files.len());
        for (name, body) in files {
            let path = output.join(name);
            fs::write(&path, body)?;
            written.push(path);
        }

        tracing::debug!(output = %output.display(), files = written.len(), "site written");
        Ok(written)
    }
}
