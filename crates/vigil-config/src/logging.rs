//! Structured logging utilities for vigil components.
//!
//! Provides consistent logging with component prefixes and structured fields.
//!
//! # Usage
//!
//! ```ignore
//! use vigil_config::log_ignore_info;
//!
//! log_ignore_info!("Ignore set built", entries = 42);
//! log_config_debug!("Loading project config", path = %path.display());
//! ```
//!
//! The hot `check` path never logs; these macros are for construction,
//! reconfiguration and config loading only.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[doc(hidden)]
pub use tracing as __tracing;

/// Component identifiers for log filtering
pub struct Component;

impl Component {
    pub const IGNORE: &'static str = "IGNORE";
    pub const CONFIG: &'static str = "CONFIG";
}

/// Log levels for runtime configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log level: {0}")]
pub struct ParseLogLevelError(pub String);

impl FromStr for LogLevel {
    type Err = ParseLogLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(ParseLogLevelError(s.to_string())),
        }
    }
}

// === IGNORE logging macros ===

#[macro_export]
macro_rules! log_ignore_warn {
    ($msg:literal $(,)?) => {
        $crate::logging::__tracing::warn!(component = $crate::logging::Component::IGNORE, $msg)
    };
    ($msg:literal, $($fields:tt)+) => {
        $crate::logging::__tracing::warn!(component = $crate::logging::Component::IGNORE, $($fields)+, $msg)
    };
}

#[macro_export]
macro_rules! log_ignore_info {
    ($msg:literal $(,)?) => {
        $crate::logging::__tracing::info!(component = $crate::logging::Component::IGNORE, $msg)
    };
    ($msg:literal, $($fields:tt)+) => {
        $crate::logging::__tracing::info!(component = $crate::logging::Component::IGNORE, $($fields)+, $msg)
    };
}

#[macro_export]
macro_rules! log_ignore_debug {
    ($msg:literal $(,)?) => {
        $crate::logging::__tracing::debug!(component = $crate::logging::Component::IGNORE, $msg)
    };
    ($msg:literal, $($fields:tt)+) => {
        $crate::logging::__tracing::debug!(component = $crate::logging::Component::IGNORE, $($fields)+, $msg)
    };
}

// === CONFIG logging macros ===

#[macro_export]
macro_rules! log_config_warn {
    ($msg:literal $(,)?) => {
        $crate::logging::__tracing::warn!(component = $crate::logging::Component::CONFIG, $msg)
    };
    ($msg:literal, $($fields:tt)+) => {
        $crate::logging::__tracing::warn!(component = $crate::logging::Component::CONFIG, $($fields)+, $msg)
    };
}

#[macro_export]
macro_rules! log_config_info {
    ($msg:literal $(,)?) => {
        $crate::logging::__tracing::info!(component = $crate::logging::Component::CONFIG, $msg)
    };
    ($msg:literal, $($fields:tt)+) => {
        $crate::logging::__tracing::info!(component = $crate::logging::Component::CONFIG, $($fields)+, $msg)
    };
}

#[macro_export]
macro_rules! log_config_debug {
    ($msg:literal $(,)?) => {
        $crate::logging::__tracing::debug!(component = $crate::logging::Component::CONFIG, $msg)
    };
    ($msg:literal, $($fields:tt)+) => {
        $crate::logging::__tracing::debug!(component = $crate::logging::Component::CONFIG, $($fields)+, $msg)
    };
}

/// Initialize logging with the given level filter.
/// Call this once at application startup; `RUST_LOG` takes precedence.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_logging(level: LogLevel) -> bool {
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_constants() {
        assert_eq!(Component::IGNORE, "IGNORE");
        assert_eq!(Component::CONFIG, "CONFIG");
    }

    #[test]
    fn test_log_level_parse() {
        assert_eq!("debug".parse::<LogLevel>(), Ok(LogLevel::Debug));
        assert_eq!(" WARNING ".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert!("loud".parse::<LogLevel>().is_err());
        assert_eq!(LogLevel::Trace.to_string(), "trace");
    }

    #[test]
    fn test_macros_expand() {
        log_ignore_debug!("debug without fields");
        log_config_info!("info with fields", count = 3, name = %"x");
    }

    #[derive(Clone, Default)]
    struct Captured(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_macros_tag_component() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            log_ignore_info!("Ignore set built", dirs = 2);
            log_config_debug!("Loading project config");
        });

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains(&format!("component=\"{}\"", Component::IGNORE)));
        assert!(lines[0].contains("dirs=2"));
        assert!(lines[1].contains(&format!("component=\"{}\"", Component::CONFIG)));
    }

    #[test]
    fn test_init_logging_is_idempotent() {
        init_logging(LogLevel::Warn);
        assert!(!init_logging(LogLevel::Warn));
    }
}
