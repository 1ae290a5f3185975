use std::sync::LazyLock;

use anyhow::Result;
use tracing::level_filters::LevelFilter;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::{format::FmtSpan, writer::MakeWriterExt};

use crate::storage::config::StoreConfig;

pub const CLI_PREFIX: &str = "cli";

/// Sets up a rolling file log in the `logs` directory of the datastore. Console output goes to
/// stderr so it never mixes with what `show` prints.
pub fn enable_logging(
    prefix: &str,
    config: &StoreConfig,
    log_level: Option<LevelFilter>,
    show_console: bool,
) -> Result<()> {
    let appender = log_appender(prefix, config)?;

    let stderr = std::io::stderr.with_filter(move |_| show_console);

    let level = log_level
        .map(|v| v.to_string())
        .unwrap_or_else(|| std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()));

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(format!(
            "{}={level}",
            env!("CARGO_PKG_NAME").replace("-", "_"),
        )))
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(stderr.and(appender))
        .pretty()
        .init();
    Ok(())
}

/// Daily log files named `<prefix>.<date>`, five days kept.
fn log_appender(prefix: &str, config: &StoreConfig) -> Result<RollingFileAppender> {
    Ok(tracing_appender::rolling::Builder::new()
        .rotation(Rotation::DAILY)
        .max_log_files(5)
        .filename_prefix(prefix)
        .build(config.log_dir())?)
}

pub static TEST_LOGGING: LazyLock<()> = LazyLock::new(|| {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::TRACE)
        .with_test_writer()
        .pretty()
        .init()
});
