//! Log output setup.

use hwbot_core::config::LoggingConfig;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `config.level`. When `config.file` names an existing
/// directory, lines go to a daily rolling file there instead of stdout; keep
/// the returned guard alive until exit so buffered lines are flushed.
pub fn init(config: &LoggingConfig) -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if !config.file.is_empty() {
        let dir = Path::new(&config.file);
        if dir.is_dir() {
            let appender = tracing_appender::rolling::daily(dir, "hwbot.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            subscriber.with_ansi(false).with_writer(writer).init();
            return Some(guard);
        }
        subscriber.init();
        tracing::warn!(
            "log directory {} does not exist, logging to stdout",
            dir.display()
        );
        return None;
    }

    subscriber.init();
    None
}
