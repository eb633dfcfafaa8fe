//! Daemon configuration with TOML file support.

use fundflow_types::{ChainId, TypesError};
use fundflow_utils::LogFormat;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("no explorer API key configured (set ETHERSCAN_API_KEY or explorer_api_key)")]
    MissingApiKey,

    #[error("request_timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("invalid default chain: {0}")]
    Chain(#[from] TypesError),
}

/// Configuration for the fundflow daemon.
///
/// Can be loaded from a TOML file via [`DaemonConfig::from_toml_file`];
/// CLI flags and environment variables override individual fields.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// Explorer API endpoint.
    #[serde(default = "default_base_url")]
    pub explorer_base_url: String,

    /// Process-wide explorer credential.
    #[serde(default)]
    pub explorer_api_key: String,

    /// Per-request timeout for explorer calls.
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Chain analysed when a request names none.
    #[serde(default = "default_chain_id")]
    pub default_chain_id: u64,

    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    #[serde(default = "default_rpc_port")]
    pub rpc_port: u16,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter, e.g. "info" or "debug,fundflow_analysis=trace".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_base_url() -> String {
    "https://api.etherscan.io/v2/api".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_chain_id() -> u64 {
    ChainId::MAINNET.as_u64()
}

fn default_listen_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_rpc_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl DaemonConfig {
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn default_chain(&self) -> Result<ChainId, ConfigError> {
        Ok(ChainId::new(self.default_chain_id)?)
    }

    /// Check the settings that startup cannot proceed without.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.explorer_api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        self.default_chain()?;
        Ok(())
    }
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            explorer_base_url: default_base_url(),
            explorer_api_key: String::new(),
            request_timeout_secs: default_timeout_secs(),
            default_chain_id: default_chain_id(),
            listen_addr: default_listen_addr(),
            rpc_port: default_rpc_port(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_toml_uses_defaults() {
        let config = DaemonConfig::from_toml_str("").unwrap();
        assert_eq!(config.explorer_base_url, "https://api.etherscan.io/v2/api");
        assert_eq!(config.request_timeout(), Duration::from_secs(15));
        assert_eq!(config.default_chain_id, 1);
        assert_eq!(config.rpc_port, 8080);
        assert_eq!(config.log_format, LogFormat::Human);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            explorer_api_key = "KEY"
            rpc_port = 9999
            log_format = "json"
            default_chain_id = 137
        "#;
        let config = DaemonConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.explorer_api_key, "KEY");
        assert_eq!(config.rpc_port, 9999);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.default_chain().unwrap().as_u64(), 137);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn round_trips_through_toml() {
        let config = DaemonConfig {
            explorer_api_key: "KEY".into(),
            ..Default::default()
        };
        let parsed = DaemonConfig::from_toml_str(&config.to_toml_string().unwrap()).unwrap();
        assert_eq!(parsed.explorer_api_key, "KEY");
        assert_eq!(parsed.rpc_port, config.rpc_port);
    }

    #[test]
    fn missing_api_key_fails_validation() {
        assert!(matches!(
            DaemonConfig::default().validate(),
            Err(ConfigError::MissingApiKey)
        ));
    }

    #[test]
    fn unsupported_default_chain_fails_validation() {
        let config = DaemonConfig {
            explorer_api_key: "KEY".into(),
            default_chain_id: 424242,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Chain(_))));
    }

    #[test]
    fn zero_timeout_fails_validation() {
        let config = DaemonConfig {
            explorer_api_key: "KEY".into(),
            request_timeout_secs: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroTimeout)));
    }

    #[test]
    fn bad_toml_is_parse_error() {
        assert!(matches!(
            DaemonConfig::from_toml_str("rpc_port = \"eighty\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "explorer_api_key = \"FROM_FILE\"").unwrap();
        let config = DaemonConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.explorer_api_key, "FROM_FILE");

        assert!(matches!(
            DaemonConfig::from_toml_file(Path::new("/nonexistent/fundflow.toml")),
            Err(ConfigError::Io(_))
        ));
    }
}
