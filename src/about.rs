//! Static application information and the outbound documentation link.

use thiserror::Error;
use tracing::{info, warn};

pub const TITLE: &str = "LLM Tester";
pub const SUBTITLE: &str = "Blind Men and an Elephant";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DESCRIPTION: &str = "\
This application allows you to test and compare responses
from multiple Large Language Models (LLMs) simultaneously.

The name references the parable of the blind men and an elephant,
where each person perceives only part of the truth.
Similarly, different LLMs may provide different perspectives
on the same prompt.";

pub const FEATURES: &[&str] = &[
    "Compare up to 10 LLM responses side-by-side",
    "Configurable model parameters",
    "Local API key management",
    "Runs in any terminal",
];

pub const FOOTER: &str = "Built with Rust, ratatui and tui-realm";

/// Documentation opened from the about tab.
pub const DOCS_URL: &str = "https://en.wikipedia.org/wiki/Blind_men_and_an_elephant";

#[derive(Debug, Error)]
pub enum LinkError {
    #[error("could not open {url}: {source}")]
    Unavailable {
        url: String,
        source: std::io::Error,
    },
}

/// Hands URLs to something that can display them.
pub trait LinkOpener {
    fn open(&self, url: &str) -> std::io::Result<()>;
}

/// Opens URLs with the operating system's default handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemBrowser;

impl LinkOpener for SystemBrowser {
    fn open(&self, url: &str) -> std::io::Result<()> {
        webbrowser::open(url)
    }
}

/// Open `url` through `opener`, reporting failure instead of propagating it
/// as fatal.
pub fn open_external_link(opener: &dyn LinkOpener, url: &str) -> Result<(), LinkError> {
    match opener.open(url) {
        Ok(()) => {
            info!(url, "opened external link");
            Ok(())
        }
        Err(source) => {
            warn!(url, error = %source, "no handler for external link");
            Err(LinkError::Unavailable {
                url: url.to_string(),
                source,
            })
        }
    }
}
