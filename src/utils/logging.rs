use std::{path::Path, sync::LazyLock};

use anyhow::Result;
use tracing::level_filters::LevelFilter;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt::writer::MakeWriterExt, EnvFilter};

const LOG_PREFIX: &str = "luleme";

/// Daily rotated log files under `application_data_path/logs`. Fails when that directory can't
/// be created.
pub fn log_file_appender(application_data_path: &Path) -> Result<RollingFileAppender> {
    Ok(tracing_appender::rolling::Builder::new()
        .rotation(Rotation::DAILY)
        .max_log_files(5)
        .filename_prefix(LOG_PREFIX)
        .build(application_data_path.join("logs"))?)
}

/// Installs the global subscriber. With an appender, logs always go to the file and stdout only
/// receives them when `show_std` is set. Without one, stderr is the only place left to log to.
pub fn enable_logging(
    appender: Option<RollingFileAppender>,
    log_level: Option<LevelFilter>,
    show_std: bool,
) {
    let level = log_level
        .map(|v| v.to_string())
        .unwrap_or_else(|| std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()));

    let subscriber = tracing_subscriber::fmt().with_env_filter(EnvFilter::new(format!(
        "{}={level}",
        env!("CARGO_PKG_NAME").replace("-", "_"),
    )));

    match appender {
        Some(appender) => {
            let stdout = std::io::stdout.with_filter(move |_| show_std);
            subscriber.with_writer(stdout.and(appender)).init()
        }
        None => subscriber.with_writer(std::io::stderr).init(),
    }
}

pub static TEST_LOGGING: LazyLock<()> = LazyLock::new(|| {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::TRACE)
        .with_test_writer()
        .pretty()
        .init()
});
