//! # Logger
//!
//! Installs the global `tracing` subscriber from the service's `[log]` section:
//! a compact console layer, an optional rolling file layer (plain or JSON)
//! written through a non-blocking worker, and an env filter seeded from the
//! configured level.
//!
//! With the `profiling` feature and `--cfg tokio_unstable`, a tokio-console
//! layer rides along with the console output.
//!
//! ## Example
//!
//! ```rust
//! # use bps_domain::config::LogConfig;
//! let cfg = LogConfig { level: "debug".to_owned(), ..LogConfig::default() };
//! let _logger = bps_logger::Logger::init("battery-pickup", &cfg).unwrap();
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use bps_domain::config::{LogConfig, LogRotation};
pub use tracing::level_filters::LevelFilter;

use std::fs;
use std::path::Path;
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const LOG_FILE_SUFFIX: &str = "log";

type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

/// A handle to the initialized logging system.
///
/// Holds the file writer's worker guard; drop it only when the process is
/// shutting down so buffered lines are flushed.
#[must_use = "Dropping this handle will stop background logging threads."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Installs the global subscriber described by `config`.
    ///
    /// `name` prefixes rolling log files (e.g. `bps-server.2026-10-18.log`).
    ///
    /// # Errors
    /// * [`LoggerError::InvalidConfiguration`] for a blank name, an unknown level,
    ///   a bad filter, `max_files = 0`, or no output at all.
    /// * [`LoggerError::Directory`] / [`LoggerError::Appender`] when the log directory is unusable.
    /// * [`LoggerError::Subscriber`] if a global subscriber is already set.
    pub fn init(name: &str, config: &LogConfig) -> Result<Self, LoggerError> {
        validate(name, config)?;
        let filter = env_filter(config)?;

        let mut layers: Vec<BoxedLayer<_>> = Vec::new();

        #[cfg(all(feature = "profiling", tokio_unstable))]
        if config.console {
            layers.push(console_subscriber::spawn().boxed());
        }

        if config.console {
            layers.push(layer().compact().with_ansi(true).boxed());
        }

        let guard = match &config.directory {
            Some(directory) => {
                let (file_layer, guard) = file_layer(name, directory, config)?;
                layers.push(file_layer);
                Some(guard)
            }
            None => None,
        };

        tracing_subscriber::registry().with(filter).with(layers).try_init()?;
        tracing::debug!(
            level = %config.level,
            console = config.console,
            directory = ?config.directory,
            "Logger installed"
        );

        Ok(Self { guard })
    }

    /// Returns a reference to the file writer's worker guard, if any.
    #[must_use]
    pub const fn guard(&self) -> Option<&WorkerGuard> {
        self.guard.as_ref()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::info!("Logging system shutting down, flushing buffers...");
        }
    }
}

/// Parses a level name such as `"info"` or `"DEBUG"` (`"off"` disables logging).
///
/// # Errors
/// Returns [`LoggerError::InvalidConfiguration`] for unknown names.
pub fn parse_level(name: &str) -> Result<LevelFilter, LoggerError> {
    name.trim().parse::<LevelFilter>().map_err(|e| LoggerError::InvalidConfiguration {
        message: format!("Unknown log level '{name}': {e}").into(),
        context: None,
    })
}

const fn rotation(rotation: LogRotation) -> Rotation {
    match rotation {
        LogRotation::Minutely => Rotation::MINUTELY,
        LogRotation::Hourly => Rotation::HOURLY,
        LogRotation::Daily => Rotation::DAILY,
        LogRotation::Never => Rotation::NEVER,
    }
}

fn validate(name: &str, config: &LogConfig) -> Result<(), LoggerError> {
    let invalid = |message: &'static str| LoggerError::InvalidConfiguration {
        message: message.into(),
        context: None,
    };

    if name.trim().is_empty() {
        return Err(invalid("Logger name cannot be empty"));
    }
    if config.max_files == 0 {
        return Err(invalid("max_files must be greater than zero"));
    }
    if !config.console && config.directory.is_none() {
        return Err(invalid("No logging output enabled. Enable console or set a directory."));
    }
    Ok(())
}

/// The configured level is the default directive; `filter` adds to it, otherwise `RUST_LOG` does.
fn env_filter(config: &LogConfig) -> Result<EnvFilter, LoggerError> {
    let builder = EnvFilter::builder().with_default_directive(parse_level(&config.level)?.into());
    match &config.filter {
        Some(directives) => builder.parse(directives).map_err(|e| {
            LoggerError::InvalidConfiguration {
                message: format!("Invalid log filter '{directives}': {e}").into(),
                context: None,
            }
        }),
        None => Ok(builder.from_env_lossy()),
    }
}

fn file_layer<S>(
    name: &str,
    directory: &Path,
    config: &LogConfig,
) -> Result<(BoxedLayer<S>, WorkerGuard), LoggerError>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fs::create_dir_all(directory)
        .context(format!("Failed to create log directory: {}", directory.display()))?;

    let appender = RollingFileAppender::builder()
        .rotation(rotation(config.rotation))
        .filename_prefix(name)
        .filename_suffix(LOG_FILE_SUFFIX)
        .max_log_files(config.max_files)
        .build(directory)?;

    let (writer, guard) = tracing_appender::non_blocking(appender);
    let file_layer = layer().with_writer(writer).with_ansi(false);
    let boxed = if config.json { file_layer.json().boxed() } else { file_layer.boxed() };

    Ok((boxed, guard))
}
