//! Site content
//!
//! Everything the pages say lives in [`SiteContent`]. The built-in default is
//! the published copy; a YAML file can override any part of it.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading content
#[derive(Error, Debug)]
pub enum ContentError {
    /// An I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid YAML for this schema
    #[error("parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Two job postings share an id
    #[error("duplicate job id: {0}")]
    DuplicateJob(String),

    /// A field failed validation
    #[error("invalid content: {0}")]
    Invalid(String),
}

/// Result type for content operations
pub type ContentResult<T> = Result<T, ContentError>;

/// An open position on the careers page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosition {
    pub id: String,
    pub title: String,
    pub department: String,
    pub location: String,
    /// Employment type, e.g. "Full-time"
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
}

/// A titled blurb (feature cards, tech stack entries)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub title: String,
    pub description: String,
}

impl Card {
    fn new(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
        }
    }
}

/// Hero section at the top of the home view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hero {
    pub badge: String,
    pub headline: String,
    /// Highlighted last word of the headline
    pub headline_accent: String,
    pub summary: String,
    pub primary_cta: String,
    pub secondary_cta: String,
}

impl Default for Hero {
    fn default() -> Self {
        Self {
            badge: "Recruiting Elite Talent".to_string(),
            headline: "Defining The".to_string(),
            headline_accent: "Edge".to_string(),
            summary: "We architect the distributed systems and high-frequency infrastructure that the world's most sophisticated hedge funds rely on.".to_string(),
            primary_cta: "Join us".to_string(),
            secondary_cta: "Our services".to_string(),
        }
    }
}

/// "About" section of the home view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct About {
    pub heading: String,
    pub lead: String,
    pub pillars: Vec<Card>,
    pub features_heading: String,
    pub features: Vec<Card>,
}

impl Default for About {
    fn default() -> Self {
        Self {
            heading: "The Phitopolis Standard.".to_string(),
            lead: "At Phitopolis, we operate at the intersection of advanced mathematics and elite software engineering. We aren't just an outsourcing arm; we are the R&D engine for global financial giants.".to_string(),
            pillars: vec![
                Card::new(
                    "Silicon Valley Culture",
                    "We've stripped away the bureaucracy to focus on what matters: code, architecture, and innovation. Our culture is built on intellectual curiosity.",
                ),
                Card::new(
                    "Wall Street Precision",
                    "Our systems handle billions of dollars in transactions with microsecond latency, demanding a level of precision found only in the highest echelons of finance.",
                ),
            ],
            features_heading: "Why Phitopolis?".to_string(),
            features: vec![
                Card::new(
                    "Elite Engineering",
                    "Architecting solutions with Python, React, and AWS for massive scale. We don't just write code; we build engines.",
                ),
                Card::new(
                    "Quantitative Research",
                    "Turning theoretical mathematical models into production-grade systems. Where data science meets high-frequency execution.",
                ),
                Card::new(
                    "Reliability & Security",
                    "High-availability infrastructure with zero-tolerance for failure. Our systems are designed to never sleep.",
                ),
            ],
        }
    }
}

/// Graduate program tab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Graduate {
    pub badge: String,
    pub headline: String,
    pub description: String,
    pub cta: String,
}

impl Default for Graduate {
    fn default() -> Self {
        Self {
            badge: "Phitopolis Academy".to_string(),
            headline: "Launch Your Career at Light Speed.".to_string(),
            description: "Our Graduate Analyst Program is designed for top-tier mathematics, computer science, and engineering graduates. You won't fetch coffee; you'll deploy code to production in your first month.".to_string(),
            cta: "Apply for 2025 cohort".to_string(),
        }
    }
}

/// Careers view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Careers {
    pub headline: String,
    pub headline_accent: String,
    pub intro: String,
    pub jobs: Vec<JobPosition>,
    pub tech_stack: Vec<Card>,
    pub life_intro: String,
    pub perks: Vec<String>,
    pub graduate: Graduate,
}

fn job(id: &str, title: &str, department: &str, location: &str, description: &str) -> JobPosition {
    JobPosition {
        id: id.to_string(),
        title: title.to_string(),
        department: department.to_string(),
        location: location.to_string(),
        kind: "Full-time".to_string(),
        description: description.to_string(),
    }
}

impl Default for Careers {
    fn default() -> Self {
        Self {
            headline: "Join the".to_string(),
            headline_accent: "Elite.".to_string(),
            intro: "We are looking for problem solvers, math enthusiasts, and engineering perfectionists to build the future of financial technology.".to_string(),
            jobs: vec![
                job(
                    "1",
                    "Senior Python Engineer",
                    "Backend Engineering",
                    "Taguig, PH (Hybrid)",
                    "Build high-throughput data pipelines and distributed systems using Python and AWS. Experience with asyncio and pandas required.",
                ),
                job(
                    "2",
                    "React Frontend Architect",
                    "Frontend Engineering",
                    "Taguig, PH (Hybrid)",
                    "Lead the development of complex data visualization dashboards for trading systems. Deep knowledge of React rendering lifecycle and D3/Canvas is essential.",
                ),
                job(
                    "3",
                    "Quantitative Developer",
                    "Research",
                    "Taguig, PH (On-site)",
                    "Work alongside researchers to implement mathematical models into production code. Strong C++ or Python skills and a math background required.",
                ),
                job(
                    "4",
                    "DevOps Engineer",
                    "Infrastructure",
                    "Remote / Taguig",
                    "Manage CI/CD pipelines, AWS infrastructure, and ensure 99.99% system availability using Terraform and Kubernetes.",
                ),
            ],
            tech_stack: vec![
                Card::new("Python", "The backbone of our data analysis and backend services. We use Pandas, NumPy, and FastAPI."),
                Card::new("React & TS", "Building complex, low-latency financial dashboards with real-time WebSocket data feeds."),
                Card::new("AWS Cloud", "Cloud-native architecture utilizing Lambda, ECS, S3, and Redshift for massive scalability."),
                Card::new("C++", "For high-frequency trading components where microsecond latency matters most."),
                Card::new("PostgreSQL", "Robust data persistence and complex querying for our research datasets."),
                Card::new("Docker & K8s", "Containerized deployments ensuring consistency from development to production."),
            ],
            life_intro: "Located in the heart of BGC, Taguig, our office is designed for collaboration. We believe in a flat hierarchy where the best ideas win, regardless of your title.".to_string(),
            perks: vec![
                "Weekly 'Tech Talks' and knowledge sharing".to_string(),
                "Fully stocked pantry and barista-grade coffee".to_string(),
                "Annual team retreats to world-class destinations".to_string(),
                "Sponsorship for conferences and continued learning".to_string(),
            ],
            graduate: Graduate::default(),
        }
    }
}

/// Footer columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Footer {
    pub location: Vec<String>,
    pub connect: Vec<String>,
    pub legal: Vec<String>,
    pub established: String,
}

impl Default for Footer {
    fn default() -> Self {
        let lines = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
        Self {
            location: lines(&["Bonifacio Global City", "Taguig, Metro Manila", "Philippines"]),
            connect: lines(&["LinkedIn", "Twitter", "GitHub"]),
            legal: lines(&["Privacy Policy", "Terms of Service", "Security"]),
            established: "EST. 2010".to_string(),
        }
    }
}

/// All copy rendered into the site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteContent {
    pub company: String,
    pub tagline: String,
    pub hero: Hero,
    /// Scrolling market ticker items (cosmetic)
    pub ticker: Vec<String>,
    pub about: About,
    pub careers: Careers,
    pub footer: Footer,
}

impl Default for SiteContent {
    fn default() -> Self {
        let ticker = [
            "BTC/USD +1.2%",
            "ETH/USD +0.8%",
            "VIX -4.2",
            "LATENCY: 4ms",
            "EXEC_RATE: 99.9%",
            "GOOGL +23.4",
            "AWS_SPOT: OPTIMAL",
            "HKG_MKR: OPEN",
            "SPX 4520.5",
            "NSDQ 14300.2",
            "YIELD 4.1%",
            "ALPHA_SIG_9: DETECTED",
            "MEM_POOL: CLEAR",
            "REPLICA_LAG: 0ms",
        ];
        Self {
            company: "Phitopolis".to_string(),
            tagline: "Making tomorrow's technology available today.".to_string(),
            hero: Hero::default(),
            ticker: ticker.iter().map(|s| s.to_string()).collect(),
            about: About::default(),
            careers: Careers::default(),
            footer: Footer::default(),
        }
    }
}

impl SiteContent {
    /// Load content from a YAML file. Missing fields keep their defaults.
    pub fn from_path(path: &Path) -> ContentResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }

    /// Parse and validate YAML content
    pub fn from_yaml(text: &str) -> ContentResult<Self> {
        let content: SiteContent = serde_yaml::from_str(text)?;
        content.validate()?;
        Ok(content)
    }

    /// Load from `path` when given, otherwise use the built-in copy
    pub fn load(path: Option<&Path>) -> ContentResult<Self> {
        match path {
            Some(path) => Self::from_path(path),
            None => Ok(Self::default()),
        }
    }

    /// Check the constraints the templates rely on
    pub fn validate(&self) -> ContentResult<()> {
        if self.company.trim().is_empty() {
            return Err(ContentError::Invalid("company name is empty".to_string()));
        }

        let mut ids = HashSet::new();
        for job in &self.careers.jobs {
            if job.id.trim().is_empty() {
                return Err(ContentError::Invalid(format!(
                    "job '{}' has an empty id",
                    job.title
                )));
            }
            if !ids.insert(job.id.as_str()) {
                return Err(ContentError::DuplicateJob(job.id.clone()));
            }
        }
        Ok(())
    }
}
