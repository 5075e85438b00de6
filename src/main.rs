//! CLI entry point for llm-tester.

use clap::{CommandFactory, Parser};
use color_eyre::eyre::{Result, WrapErr};

use llm_tester::cli::Cli;
use llm_tester::config::AppConfig;
use llm_tester::logging::init_logging;
use llm_tester::tui;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "llm-tester", &mut std::io::stdout());
        return Ok(());
    }

    let config = AppConfig::resolve(&cli).wrap_err("Failed to load configuration")?;
    let _guard = init_logging(&config.logging.file, &config.logging.level);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        credentials = %config.credentials_path().display(),
        "starting"
    );

    tui::run(&config)
}
