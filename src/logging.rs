use std::path::PathBuf;

use directories::ProjectDirs;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer,
};

use crate::config::HomewatchConfig;

/// Configuration for the logging system
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level for console output
    pub console_level: Level,
    /// Log level for file output
    pub file_level: Level,
    /// Directory where log files should be written; `None` disables file logs
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            console_level: Level::INFO,
            file_level: Level::DEBUG,
            log_dir: Some(Self::default_log_dir()),
        }
    }
}

impl LoggingConfig {
    /// Get the OS-appropriate default log directory
    pub fn default_log_dir() -> PathBuf {
        if let Some(proj_dirs) = ProjectDirs::from("", "", "homewatch") {
            proj_dirs.cache_dir().to_path_buf()
        } else {
            PathBuf::from("homewatch-logs")
        }
    }

    /// Build the logging configuration from the file config and environment.
    pub fn from_env(config: &HomewatchConfig) -> Self {
        let mut logging = Self::default();

        if let Some(log_level) = &config.log_level {
            if let Ok(level) = log_level.parse::<Level>() {
                logging.console_level = level;
                logging.file_level = level;
            }

            if log_level == "Off" {
                logging.log_dir = None;
            }
        }

        if let Ok(level) = std::env::var("HOMEWATCH_LOG_LEVEL") {
            if let Ok(parsed_level) = level.parse::<Level>() {
                logging.console_level = parsed_level;
                logging.file_level = parsed_level;
            }
        }

        if let Ok(log_dir) = std::env::var("HOMEWATCH_LOG_DIR") {
            logging.log_dir = Some(PathBuf::from(log_dir));
        }

        if std::env::var("HOMEWATCH_NO_FILE_LOGS").is_ok() {
            logging.log_dir = None;
        }

        logging
    }
}

/// Initialize the logging system with the given configuration
///
/// Always logs to stdout; additionally writes a daily-rolling file when a
/// log directory is configured. Lines carry the source location so a log
/// entry can be traced back to the emitting function.
pub fn init_logging(
    config: LoggingConfig,
) -> Result<Option<WorkerGuard>, Box<dyn std::error::Error>> {
    let mut layers = vec![];
    let mut guard = None;

    if let Some(log_dir) = &config.log_dir {
        std::fs::create_dir_all(log_dir)?;

        let file_appender = tracing_appender::rolling::daily(log_dir, "homewatch.log");
        let (non_blocking, file_guard) = tracing_appender::non_blocking(file_appender);
        guard = Some(file_guard);

        let file_layer = fmt::layer()
            .with_writer(non_blocking)
            .with_target(false)
            .with_file(true)
            .with_line_number(true)
            .with_filter(
                EnvFilter::builder()
                    .with_default_directive(config.file_level.into())
                    .from_env_lossy(),
            )
            .boxed();

        layers.push(file_layer);
    }

    let console_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_filter(
            EnvFilter::builder()
                .with_default_directive(config.console_level.into())
                .from_env_lossy(),
        )
        .boxed();

    layers.push(console_layer);

    let subscriber = tracing_subscriber::registry().with(layers);
    subscriber.init();

    Ok(guard)
}
