use std::path::Path;

use anyhow::Result;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Initialize the logging system with tracing.
///
/// If `log_dir` is provided, logs will also be written to a daily file in that directory.
/// `RUST_LOG` overrides the default filter.
pub fn init_logging(log_dir: Option<&Path>, verbose: bool) -> Result<()> {
    let default_filter = if verbose {
        "letterfall=debug,warn"
    } else {
        "letterfall=info,warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let registry = tracing_subscriber::registry().with(filter);

    if let Some(dir) = log_dir {
        let file_appender = RollingFileAppender::new(Rotation::DAILY, dir, "letterfall.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        // The writer must outlive the process; init_logging runs once.
        std::mem::forget(guard);

        registry
            .with(fmt::layer().with_target(true))
            .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
            .try_init()?;
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()?;
    }

    Ok(())
}
