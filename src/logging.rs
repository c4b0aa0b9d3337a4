//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! The library itself only emits events. Embedders and tests call
//! [`init_logging`] once to see them.
//!
//! # Log Levels
//!
//! - `warn`: rejected user input
//! - `info`: alerts, opened windows, completed sign-ups
//! - `debug`: navigation, menu and modal transitions, reveal progress
//! - `trace`: timers, observers, patch commits
//!
//! `RUST_LOG` overrides the configured level.

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-line, human-readable.
    Pretty,
    /// Single-line.
    #[default]
    Compact,
}

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Level for this crate when `RUST_LOG` is unset.
    pub level: Level,
    pub format: LogFormat,
    /// Include the module path of each event.
    pub with_target: bool,
    pub with_ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: LogFormat::default(),
            with_target: false,
            with_ansi: true,
        }
    }
}

impl LogConfig {
    /// Map a verbosity count to a level: 0 info, 1 debug, 2+ trace.
    #[must_use]
    pub fn from_verbosity(verbosity: u8) -> Self {
        let level = match verbosity {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        };
        Self {
            level,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_target(mut self, enable: bool) -> Self {
        self.with_target = enable;
        self
    }

    #[must_use]
    pub fn with_ansi(mut self, enable: bool) -> Self {
        self.with_ansi = enable;
        self
    }

    /// The filter directive used when `RUST_LOG` is unset.
    pub fn default_directive(&self) -> String {
        format!("haustier_oase={}", self.level.as_str().to_lowercase())
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.default_directive()))
    }
}

/// Install the global subscriber.
///
/// Returns an error if a subscriber is already installed, which is expected
/// when several tests initialize logging.
pub fn init_logging(config: &LogConfig) -> Result<(), tracing_subscriber::util::TryInitError> {
    let registry = tracing_subscriber::registry().with(config.filter());
    match config.format {
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_target(config.with_target)
                    .with_ansi(config.with_ansi),
            )
            .try_init(),
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(config.with_target)
                    .with_ansi(config.with_ansi),
            )
            .try_init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(LogConfig::from_verbosity(0).level, Level::INFO);
        assert_eq!(LogConfig::from_verbosity(1).level, Level::DEBUG);
        assert_eq!(LogConfig::from_verbosity(5).level, Level::TRACE);
    }

    #[test]
    fn directive_targets_this_crate() {
        let config = LogConfig::default().with_level(Level::DEBUG);
        assert_eq!(config.default_directive(), "haustier_oase=debug");
    }

    #[test]
    fn second_init_is_an_error_not_a_panic() {
        let config = LogConfig::default().with_ansi(false);
        let _ = init_logging(&config);
        assert!(init_logging(&config).is_err());
    }
}
