//! Configuration management for the `VenueDesk` dashboard

use crate::types::BulkMode;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Dashboard server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// REST backend configuration
    #[serde(default)]
    pub backend: BackendConfig,

    /// Translation configuration
    #[serde(default)]
    pub i18n: I18nConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

/// REST backend the dashboard talks to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL every endpoint is appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token sent with every request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// How bulk deletes are sent
    #[serde(default)]
    pub bulk_mode: BulkMode,
}

/// Translation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct I18nConfig {
    /// Language used when nothing valid is stored
    #[serde(default = "default_language")]
    pub default_language: String,

    /// File the selected language is persisted to
    #[serde(default = "default_storage_path")]
    pub storage_path: PathBuf,

    /// Directory of `<code>.json` dictionaries replacing the embedded ones
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locales_dir: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json or text)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    8081
}

fn default_base_url() -> String {
    "http://127.0.0.1:8080/api".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

fn default_language() -> String {
    "en".to_string()
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("./data/preferences.json")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            timeout_secs: default_timeout_secs(),
            bulk_mode: BulkMode::default(),
        }
    }
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_language: default_language(),
            storage_path: default_storage_path(),
            locales_dir: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from an optional `venuedesk` file and
    /// `VENUEDESK__SECTION__FIELD` environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or parsed.
    pub fn load() -> crate::Result<Self> {
        Self::load_from("venuedesk")
    }

    /// Load configuration using `name` as the file stem
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or parsed.
    pub fn load_from(name: &str) -> crate::Result<Self> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(name).required(false))
            .add_source(
                config::Environment::with_prefix("VENUEDESK")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()
            .map_err(|e| crate::Error::Configuration {
                message: e.to_string(),
            })?;

        config
            .try_deserialize()
            .map_err(|e| crate::Error::Configuration {
                message: e.to_string(),
            })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8081);

        assert_eq!(config.backend.base_url, "http://127.0.0.1:8080/api");
        assert!(config.backend.token.is_none());
        assert_eq!(config.backend.timeout_secs, 30);
        assert_eq!(config.backend.bulk_mode, BulkMode::Batch);

        assert_eq!(config.i18n.default_language, "en");
        assert_eq!(
            config.i18n.storage_path,
            PathBuf::from("./data/preferences.json")
        );
        assert!(config.i18n.locales_dir.is_none());

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_partial_config_deserialization() {
        let json_str = r#"{
            "server": {"port": 9000},
            "backend": {"bulk_mode": "per_item", "token": "secret"},
            "i18n": {}
        }"#;

        let config: Config = serde_json::from_str(json_str).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.backend.bulk_mode, BulkMode::PerItem);
        assert_eq!(config.backend.token.as_deref(), Some("secret"));
        assert_eq!(config.backend.timeout_secs, 30);
        assert_eq!(config.i18n.default_language, "en");
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_config_without_token_omits_field() {
        let serialized = serde_json::to_string(&Config::default()).unwrap();
        assert!(!serialized.contains("token"));
        assert!(!serialized.contains("locales_dir"));

        let deserialized: Config = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized.server.port, 8081);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboard.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[backend]\nbase_url = \"https://backend.example.com/api\"\ntimeout_secs = 5\n\n[i18n]\ndefault_language = \"ja\""
        )
        .unwrap();

        let stem = dir.path().join("dashboard");
        let config = Config::load_from(stem.to_str().unwrap()).unwrap();

        assert_eq!(config.backend.base_url, "https://backend.example.com/api");
        assert_eq!(config.backend.timeout_secs, 5);
        assert_eq!(config.i18n.default_language, "ja");
        assert_eq!(config.server.port, 8081);
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let config = Config::load_from("definitely-not-a-config-file").unwrap();
        assert_eq!(config.backend.bulk_mode, BulkMode::Batch);
    }
}
