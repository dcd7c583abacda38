//! Logging setup: console output plus a rotating debug log file.

use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::print_warning;

/// Prefix of the log files inside the log directory.
pub const LOG_FILE_PREFIX: &str = "civitai_downloader";

/// Number of rotated log files kept on disk.
pub const MAX_LOG_FILES: usize = 5;

/// Daily-rotated log file writer in `dir`, keeping at most [`MAX_LOG_FILES`].
pub fn log_file_appender(dir: &Path) -> Result<RollingFileAppender> {
    std::fs::create_dir_all(dir)?;
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .max_log_files(MAX_LOG_FILES)
        .build(dir)
        .map_err(|e| Error::Io(std::io::Error::other(e)))
}

/// Console logging at the configured level plus a debug-level log file.
///
/// `RUST_LOG` overrides the configured console level. A log directory that
/// cannot be used only disables the file layer.
pub fn init_logging(config: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let console_layer = fmt::layer().with_target(false).with_filter(filter);

    let file_layer = match log_file_appender(&config.log_dir) {
        Ok(appender) => Some(
            fmt::layer()
                .with_ansi(false)
                .with_writer(appender)
                .with_filter(LevelFilter::DEBUG),
        ),
        Err(e) => {
            print_warning(&format!(
                "Cannot open log file in {}: {}",
                config.log_dir.display(),
                e
            ));
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}
