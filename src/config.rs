use std::env;
use std::path::PathBuf;

/// Configuration for the split-ledger CLI tool.
///
/// The engine core takes no configuration; everything here drives the
/// command-line surface only.
#[derive(Debug, Clone)]
pub struct Config {
    /// Data directory path (default: `.split-ledger/` in current directory)
    pub data_dir: PathBuf,

    /// Output format: "human" (default) or "json"
    pub output_format: String,

    /// Log level: "info", "debug", "warn", "error" (default: "info")
    pub log_level: String,
}

impl Config {
    /// Create a new config with defaults
    pub fn new() -> Self {
        let data_dir = env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(".split-ledger");

        Config {
            data_dir,
            output_format: "human".to_string(),
            log_level: "info".to_string(),
        }
    }

    /// Create config with custom data directory
    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        Config {
            data_dir,
            ..Config::new()
        }
    }

    pub fn set_output_format(&mut self, format: String) {
        self.output_format = format;
    }

    pub fn set_log_level(&mut self, level: String) {
        self.log_level = level;
    }

    /// Path of the serialized ledger file
    pub fn ledger_path(&self) -> PathBuf {
        self.data_dir.join("ledger.json")
    }

    /// Load config from environment variables
    ///
    /// Environment variables:
    /// - `SPLIT_LEDGER_DATA_DIR`: override data directory
    /// - `SPLIT_LEDGER_OUTPUT_FORMAT`: "human" or "json"
    /// - `SPLIT_LEDGER_LOG_LEVEL`: log level
    pub fn from_env() -> Self {
        let mut config = Config::new();

        if let Ok(dir) = env::var("SPLIT_LEDGER_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }

        if let Ok(format) = env::var("SPLIT_LEDGER_OUTPUT_FORMAT") {
            config.output_format = format;
        }

        if let Ok(level) = env::var("SPLIT_LEDGER_LOG_LEVEL") {
            config.log_level = level;
        }

        config
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::new();
        assert_eq!(config.output_format, "human");
        assert_eq!(config.log_level, "info");
        assert!(config.data_dir.ends_with(".split-ledger"));
    }

    #[test]
    fn test_config_paths() {
        let config = Config::new();
        assert!(config.ledger_path().ends_with("ledger.json"));
    }

    #[test]
    fn test_config_setters() {
        let mut config = Config::new();
        config.set_output_format("json".to_string());
        assert_eq!(config.output_format, "json");

        config.set_log_level("debug".to_string());
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_with_data_dir() {
        let config = Config::with_data_dir(PathBuf::from("/tmp/ledger-test"));
        assert_eq!(config.data_dir, PathBuf::from("/tmp/ledger-test"));
        assert_eq!(config.output_format, "human");
    }
}
