//! Logging configuration from environment variables

use std::path::PathBuf;

use lib_utils::envs::{get_env_bool, get_env_or};

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "dashboard=info,warn";

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Log level filter (e.g., "dashboard=debug,info")
    pub log_level: String,
    /// Directory for the daily-rotated log file
    pub log_dir: PathBuf,
    /// Write a log file next to stderr output
    pub file_enabled: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_FILTER.to_string(),
            log_dir: PathBuf::from("logs"),
            file_enabled: false,
        }
    }
}

impl LogConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            log_level: get_env_or("RUST_LOG", DEFAULT_LOG_FILTER),
            log_dir: PathBuf::from(get_env_or("DASHBOARD_LOG_DIR", "logs")),
            file_enabled: get_env_bool("DASHBOARD_LOG_FILE_ENABLED", false).unwrap_or(false),
        }
    }

    /// Check if debug logging is enabled
    pub fn is_debug_enabled(&self) -> bool {
        self.log_level.contains("debug") || self.log_level.contains("trace")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_quiet() {
        let config = LogConfig::default();
        assert!(!config.file_enabled);
        assert!(!config.is_debug_enabled());
    }

    #[test]
    fn test_debug_detection() {
        let config = LogConfig {
            log_level: "dashboard=debug".into(),
            ..Default::default()
        };
        assert!(config.is_debug_enabled());
    }
}
