use std::{path::Path, sync::LazyLock};

use anyhow::{Context, Result};
use tracing::level_filters::LevelFilter;
use tracing_appender::rolling::Rotation;
use tracing_subscriber::{
    fmt::{format::FmtSpan, writer::MakeWriterExt},
    EnvFilter,
};

pub const LOG_FILE_PREFIX: &str = "lifeplanner";
pub const MAX_LOG_FILES: usize = 5;

/// Level used when neither `--log` nor `RUST_LOG` say otherwise.
const DEFAULT_LEVEL: LevelFilter = LevelFilter::INFO;

/// Sends logs into daily rotated files under `logs_path`.
///
/// With `verbose` everything down to trace is also printed to stderr, so it never mixes with what
/// the commands print to stdout. Without it the level comes from `RUST_LOG`.
pub fn enable_logging(logs_path: &Path, verbose: bool) -> Result<()> {
    let appender = tracing_appender::rolling::Builder::new()
        .rotation(Rotation::DAILY)
        .max_log_files(MAX_LOG_FILES)
        .filename_prefix(LOG_FILE_PREFIX)
        .build(logs_path)
        .with_context(|| format!("Failed to open logs in {logs_path:?}"))?;

    let stderr = std::io::stderr.with_filter(move |_| verbose);

    let level = if verbose {
        LevelFilter::TRACE.to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LEVEL.to_string())
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!(
            "{}={level}",
            env!("CARGO_PKG_NAME").replace("-", "_"),
        )))
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(stderr.and(appender))
        .with_ansi(false)
        .pretty()
        .init();
    Ok(())
}

pub static TEST_LOGGING: LazyLock<()> = LazyLock::new(|| {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::TRACE)
        .with_test_writer()
        .pretty()
        .init()
});
