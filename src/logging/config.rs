//! Logging configuration
//!
//! Log level, output destinations and formatting options for the lesson runner.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const VALID_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Global log level (trace, debug, info, warn, error)
    pub global_level: String,

    /// Enable console output
    pub console_output: bool,

    /// Directory for log files (None = no file logging)
    pub log_directory: Option<PathBuf>,

    /// Include file location in logs
    pub include_file_location: bool,

    /// Write file logs as JSON lines instead of plain text
    pub json_file_output: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            global_level: "warn".to_string(),
            console_output: true,
            log_directory: None,
            include_file_location: false,
            json_file_output: true,
        }
    }
}

impl LoggingConfig {
    /// Verbose console logging with source locations
    pub fn development() -> Self {
        Self {
            global_level: "debug".to_string(),
            console_output: true,
            log_directory: Some(PathBuf::from("logs")),
            include_file_location: true,
            json_file_output: false,
        }
    }

    /// Raise the level by `-v` count: 1 = info, 2 = debug, 3+ = trace
    pub fn with_verbosity(mut self, verbose: u8) -> Self {
        let level = match verbose {
            0 => return self,
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        self.global_level = level.to_string();
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if !VALID_LEVELS.contains(&self.global_level.as_str()) {
            return Err(format!(
                "Invalid global_level: {}. Must be one of: {:?}",
                self.global_level, VALID_LEVELS
            ));
        }

        if let Some(ref log_dir) = self.log_directory {
            if let Some(parent) = log_dir.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    return Err(format!("Log directory parent does not exist: {:?}", parent));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.global_level, "warn");
        assert!(config.console_output);
        assert!(config.log_directory.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(LoggingConfig::default().with_verbosity(0).global_level, "warn");
        assert_eq!(LoggingConfig::default().with_verbosity(1).global_level, "info");
        assert_eq!(LoggingConfig::default().with_verbosity(2).global_level, "debug");
        assert_eq!(LoggingConfig::default().with_verbosity(7).global_level, "trace");
    }

    #[test]
    fn test_config_validation() {
        let mut config = LoggingConfig::development();
        assert!(config.validate().is_ok());

        config.global_level = "loud".to_string();
        assert!(config.validate().is_err());

        config.global_level = "info".to_string();
        config.log_directory = Some(PathBuf::from("/definitely/not/here/logs"));
        assert!(config.validate().is_err());
    }
}
