//! CLI configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// Configuration for the tally CLI.
///
/// Can be loaded from a TOML file via [`CliConfig::from_toml_file`]; CLI
/// flags and environment variables override file values.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CliConfig {
    /// Node endpoint acting as wallet provider and contract gateway.
    /// Absent means: rely on the dev fallback (dev builds only).
    #[serde(default)]
    pub node_url: Option<String>,

    /// Gas ceiling applied to every write transaction.
    #[serde(default = "default_gas_limit")]
    pub gas_limit: u64,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl CliConfig {
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            node_url: None,
            gas_limit: default_gas_limit(),
            request_timeout_secs: default_request_timeout_secs(),
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_gas_limit() -> u64 {
    tally_chain::DEFAULT_GAS_LIMIT
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn full_config_parses() {
        let file = write_config(
            r#"
            node_url = "http://10.0.0.5:8545"
            gas_limit = 5000000
            request_timeout_secs = 10
            log_format = "json"
            log_level = "debug"
            "#,
        );

        let cfg = CliConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(cfg.node_url.as_deref(), Some("http://10.0.0.5:8545"));
        assert_eq!(cfg.gas_limit, 5_000_000);
        assert_eq!(cfg.request_timeout_secs, 10);
        assert_eq!(cfg.log_format, "json");
        assert_eq!(cfg.log_level, "debug");
    }

    #[test]
    fn missing_fields_use_defaults() {
        let file = write_config("node_url = \"http://10.0.0.5:8545\"\n");

        let cfg = CliConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(cfg.gas_limit, tally_chain::DEFAULT_GAS_LIMIT);
        assert_eq!(cfg.request_timeout_secs, 30);
        assert_eq!(cfg.log_format, "human");
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = CliConfig::from_toml_file(Path::new("/nonexistent/tally.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let file = write_config("gas_limit = \"not a number\"\n");
        let err = CliConfig::from_toml_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
