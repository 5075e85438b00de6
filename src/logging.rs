//! Logging configuration using tracing with file appender.
//!
//! The terminal belongs to the UI while it runs, so events go to a file.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::DEFAULT_LOG_FILE;

/// Initialize tracing with file output.
///
/// Returns a guard that must be held for the duration of the program to ensure
/// logs are flushed.
///
/// In debug builds, span enter/exit events are logged as well.
pub fn init_logging(log_path: &Path, level: &str) -> WorkerGuard {
    let parent = log_path.parent().unwrap_or(Path::new("."));
    let filename = log_path
        .file_name()
        .unwrap_or_else(|| std::ffi::OsStr::new(DEFAULT_LOG_FILE));

    let file_appender = tracing_appender::rolling::never(parent, filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_new(format!("llm_tester={level}"))
        .unwrap_or_else(|_| EnvFilter::new("llm_tester=info"));

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(false);

    #[cfg(debug_assertions)]
    let file_layer = {
        use tracing_subscriber::fmt::format::FmtSpan;
        file_layer.with_span_events(FmtSpan::ENTER | FmtSpan::CLOSE)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();

    guard
}
