//! # vigil-config
//!
//! Configuration for the vigil ignore-path matcher.
//!
//! Loads configuration from:
//! 1. `~/.vigil/config.toml` (global)
//! 2. `.vigil/config.toml` (project-local, overrides global)
//! 3. Environment variables (highest priority)

#[macro_use]
pub mod logging;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub use logging::LogLevel;

/// Project-local config path, relative to the watch root
pub const PROJECT_CONFIG_PATH: &str = ".vigil/config.toml";

/// Environment variable overriding `logging.level`
pub const LOG_LEVEL_ENV: &str = "VIGIL_LOG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ignore: IgnoreConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config from standard locations
    pub fn load() -> Result<Self, ConfigError> {
        let global = Self::global_config_path();
        Self::load_layered(global.as_deref(), Some(Path::new(PROJECT_CONFIG_PATH)))
    }

    /// Load config from an explicit global and project file.
    ///
    /// Missing files are skipped. Fields present in the project file replace
    /// the global ones; `vcs_exceptions` are replaced per root.
    pub fn load_layered(global: Option<&Path>, project: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(global_path) = global.filter(|p| p.exists()) {
            log_config_debug!("Loading global config", path = %global_path.display());
            config = Self::load_from(global_path)?;
        }

        if let Some(project_path) = project.filter(|p| p.exists()) {
            log_config_debug!("Loading project config", path = %project_path.display());
            let contents = std::fs::read_to_string(project_path)?;
            let overlay: ConfigOverlay = toml::from_str(&contents)?;
            config.merge(overlay);
        }

        config.apply_env_overrides();

        log_config_info!(
            "Config loaded",
            ignore_dirs = config.ignore.ignore_dirs.len(),
            ignore_vcs = config.ignore.ignore_vcs.len()
        );
        Ok(config)
    }

    /// Load a single config file, without env overrides
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Global config path: ~/.vigil/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".vigil/config.toml"))
    }

    fn merge(&mut self, other: ConfigOverlay) {
        let ignore = other.ignore;
        if let Some(dirs) = ignore.ignore_dirs {
            self.ignore.ignore_dirs = dirs;
        }
        if let Some(vcs) = ignore.ignore_vcs {
            self.ignore.ignore_vcs = vcs;
        }
        if let Some(exceptions) = ignore.vcs_exceptions {
            self.ignore.vcs_exceptions.extend(exceptions);
        }
        if let Some(level) = other.logging.level {
            self.logging.level = level;
        }
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        if let Ok(level) = std::env::var(LOG_LEVEL_ENV) {
            match level.parse() {
                Ok(level) => self.logging.level = level,
                Err(_) => log_config_warn!("Ignoring invalid log level override", value = %level),
            }
        }
    }

    /// Install the global subscriber at the configured `logging.level`.
    ///
    /// Returns `false` if a subscriber was already installed.
    pub fn init_logging(&self) -> bool {
        logging::init_logging(self.logging.level)
    }

    /// Generate default config TOML string
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Config::default()).unwrap_or_default()
    }
}

/// Ignore rules for one watch root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IgnoreConfig {
    /// Directories (relative to the watch root) excluded with everything below them
    pub ignore_dirs: Vec<String>,
    /// VCS metadata directory names
    pub ignore_vcs: Vec<String>,
    /// Per VCS root, sub-paths that must stay visible (e.g. a lock file)
    pub vcs_exceptions: BTreeMap<String, Vec<String>>,
}

impl Default for IgnoreConfig {
    fn default() -> Self {
        Self {
            ignore_dirs: Vec::new(),
            ignore_vcs: vec![".git".to_string(), ".hg".to_string(), ".svn".to_string()],
            vcs_exceptions: BTreeMap::from([(".hg".to_string(), vec!["wlock".to_string()])]),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
        }
    }
}

/// Project-level overrides; only the fields present in the file are applied.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigOverlay {
    ignore: IgnoreOverlay,
    logging: LoggingOverlay,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct IgnoreOverlay {
    ignore_dirs: Option<Vec<String>>,
    ignore_vcs: Option<Vec<String>>,
    vcs_exceptions: Option<BTreeMap<String, Vec<String>>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LoggingOverlay {
    level: Option<LogLevel>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.ignore.ignore_dirs.is_empty());
        assert_eq!(config.ignore.ignore_vcs, vec![".git", ".hg", ".svn"]);
        assert_eq!(config.ignore.vcs_exceptions.len(), 1);
        assert_eq!(config.ignore.vcs_exceptions[".hg"], vec!["wlock"]);
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(toml_str.contains("[ignore]"));
        assert!(toml_str.contains(".hg"));
        assert!(toml_str.contains("[logging]"));
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = Config::default();
        config.ignore.ignore_dirs = vec!["build".into(), "buck-out".into()];
        config
            .ignore
            .vcs_exceptions
            .insert(".hg".into(), vec!["wlock".into()]);
        let parsed = Config::from_toml_str(&toml::to_string(&config).unwrap()).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_init_logging_uses_configured_level() {
        let config = Config::from_toml_str("[logging]\nlevel = \"debug\"\n").unwrap();
        assert_eq!(config.logging.level, LogLevel::Debug);
        config.init_logging();
        assert!(!config.init_logging());
    }

    #[test]
    fn test_overlay_only_replaces_present_fields() {
        let mut config = Config::default();
        config.ignore.ignore_vcs = vec![".git".into()];
        config.ignore.ignore_dirs = vec!["target".into()];

        let overlay: ConfigOverlay = toml::from_str(
            r#"
[ignore]
ignore_dirs = ["build"]
"#,
        )
        .unwrap();
        config.merge(overlay);

        assert_eq!(config.ignore.ignore_dirs, vec!["build"]);
        assert_eq!(config.ignore.ignore_vcs, vec![".git"]);
    }
}
