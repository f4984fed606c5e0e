//! Agent configuration file support.
//!
//! Loads `hostwatch.toml` and turns its `[logging]` section into the
//! [`LogSettings`] the logging registry derives channel state from. A
//! missing file yields defaults; a malformed file is a hard error so the
//! agent does not silently run misconfigured.

use std::path::{Path, PathBuf};

use hostwatch_logging::LogSettings;
use serde::Deserialize;
use thiserror::Error;

/// The config file name, looked up in the agent's working directory.
pub const CONFIG_FILE_NAME: &str = "hostwatch.toml";

const LOG_FILE_NAME: &str = "hostwatch.log";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Top-level agent configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Logging section; every field optional.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// The `[logging]` section.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Debug level; `>= 1` turns on Debug-channel file output.
    #[serde(default)]
    pub debug_level: u32,
    /// Debugger-console output toggle.
    #[serde(default = "default_windbg")]
    pub windbg: bool,
    /// Log file override; the default location is used when absent.
    pub file: Option<PathBuf>,
    /// Message prefix shown on debugger output.
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

fn default_windbg() -> bool {
    true
}

fn default_prefix() -> String {
    "hostwatch".to_owned()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            debug_level: 0,
            windbg: default_windbg(),
            file: None,
            prefix: default_prefix(),
        }
    }
}

impl AgentConfig {
    /// Loads configuration from an explicit file path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads from `working_dir/hostwatch.toml`, falling back to defaults
    /// when the file does not exist.
    pub fn load_or_default(working_dir: &Path) -> Result<Self, ConfigError> {
        let path = working_dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    /// The settings the logging registry derives channel state from.
    pub fn log_settings(&self) -> LogSettings {
        LogSettings {
            debug_level: self.logging.debug_level,
            windbg: self.logging.windbg,
            log_file: self
                .logging
                .file
                .clone()
                .unwrap_or_else(default_log_file_name),
            prefix: self.logging.prefix.clone(),
        }
    }
}

/// Default log location: `<local data dir>/hostwatch/hostwatch.log`, with a
/// temp-dir fallback when no data dir is available.
pub fn default_log_file_name() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("hostwatch"))
        .unwrap_or_else(std::env::temp_dir)
        .join(LOG_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = AgentConfig::load_or_default(dir.path()).unwrap();

        assert_eq!(config.logging.debug_level, 0);
        assert!(config.logging.windbg);
        assert!(config.logging.file.is_none());

        let settings = config.log_settings();
        assert_eq!(settings.log_file, default_log_file_name());
        assert_eq!(settings.prefix, "hostwatch");
    }

    #[test]
    fn logging_section_is_parsed() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"
[logging]
debug_level = 1
windbg = false
file = "/var/log/hostwatch/agent.log"
prefix = "agent"
"#,
        )
        .unwrap();

        let config = AgentConfig::load_or_default(dir.path()).unwrap();
        let settings = config.log_settings();
        assert_eq!(settings.debug_level, 1);
        assert!(!settings.windbg);
        assert_eq!(
            settings.log_file,
            PathBuf::from("/var/log/hostwatch/agent.log")
        );
        assert_eq!(settings.prefix, "agent");
    }

    #[test]
    fn malformed_file_is_a_hard_error() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[logging]\ndebug_level = \"not a number\"\n",
        )
        .unwrap();

        let err = AgentConfig::load_or_default(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[logging]\nrotation = \"daily\"\n",
        )
        .unwrap();

        assert!(AgentConfig::load_or_default(dir.path()).is_err());
    }

    #[test]
    fn default_log_path_is_absolute() {
        assert!(default_log_file_name().is_absolute());
        assert!(default_log_file_name().ends_with(LOG_FILE_NAME));
    }
}
