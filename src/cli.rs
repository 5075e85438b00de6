//! CLI argument definitions.

use std::path::PathBuf;

use clap::Parser;

use crate::theme::{AppearanceMode, ColorTheme};

/// Compose a prompt and compare model settings side by side in the terminal.
#[derive(Parser, Debug, Default)]
#[command(name = "llm-tester")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Load configuration from TOML file (default: ./llm-tester.toml if present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Credential file (default: ./config.json)
    #[arg(long, value_name = "FILE")]
    pub credentials: Option<PathBuf>,

    /// Appearance mode
    #[arg(long, value_enum)]
    pub appearance: Option<AppearanceMode>,

    /// Accent color theme
    #[arg(long, value_enum)]
    pub theme: Option<ColorTheme>,

    /// Log file path (default: llm-tester.log)
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, error (default: info)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Generate shell completions for the specified shell
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<clap_complete::Shell>,
}
