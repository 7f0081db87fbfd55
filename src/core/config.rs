//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::core::i18n::Locale;

/// Translation endpoint of the Yandex Translate XML API
pub const DEFAULT_API_ENDPOINT: &str = "https://translate.yandex.net/api/v1.5/tr/translate";

/// User agent sent with every request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

const DEFAULT_TIMEOUT_MS: u64 = 30000;

/// Configuration for translator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    pub api_endpoint: String,
    pub timeout_ms: u64,
    pub user_agent: String,
    pub locale: Locale,
    /// File backing non-temporary credentials; memory only when unset
    pub credentials_path: Option<PathBuf>,
    pub enabled: bool,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            locale: Locale::En,
            credentials_path: None,
            enabled: true,
        }
    }
}

impl TranslatorConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from a variable lookup, defaults for anything unset
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_endpoint = lookup("YANDEX_API_ENDPOINT").unwrap_or(defaults.api_endpoint);

        let timeout_ms = lookup("REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|| DEFAULT_TIMEOUT_MS.to_string())
            .parse::<u64>()?;

        let user_agent = lookup("YANDEX_USER_AGENT").unwrap_or(defaults.user_agent);

        let locale = lookup("YANDEX_LOCALE")
            .or_else(|| lookup("LANG"))
            .and_then(|value| Locale::parse(&value))
            .unwrap_or_default();

        let credentials_path = lookup("YANDEX_CREDENTIALS_FILE")
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);

        let enabled = match lookup("ALLOW_YANDEX_TRANSLATE") {
            Some(value) => parse_flag(&value)?,
            None => defaults.enabled,
        };

        Ok(Self {
            api_endpoint,
            timeout_ms,
            user_agent,
            locale,
            credentials_path,
            enabled,
        })
    }

    /// Load from a JSON file when given, otherwise from the environment
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let config = match path {
            Some(path) => {
                info!("Loading configuration from {}", path.display());
                Self::from_file(path)?
            }
            None => Self::from_env()?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Load from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_endpoint.is_empty() {
            return Err(anyhow::anyhow!("API endpoint is required"));
        }

        if !self.api_endpoint.starts_with("http://") && !self.api_endpoint.starts_with("https://") {
            return Err(anyhow::anyhow!(
                "API endpoint must be an http(s) URL: {}",
                self.api_endpoint
            ));
        }

        if self.timeout_ms == 0 {
            return Err(anyhow::anyhow!("timeout_ms must be greater than 0"));
        }

        if !self.enabled {
            warn!("Yandex translation is disabled");
        }

        Ok(())
    }
}

fn parse_flag(value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(anyhow::anyhow!("Invalid boolean value: {}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_json_diff::assert_json_include;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_config_validation() {
        let config = TranslatorConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_bad_endpoint() {
        let config = TranslatorConfig {
            api_endpoint: "ftp://example.com".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = TranslatorConfig {
            timeout_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_lookup_defaults() {
        let config = TranslatorConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, TranslatorConfig::default());
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = TranslatorConfig::from_lookup(lookup_from(&[
            ("YANDEX_API_ENDPOINT", "http://localhost:8080/tr"),
            ("REQUEST_TIMEOUT_MS", "500"),
            ("LANG", "ru_RU.UTF-8"),
            ("YANDEX_CREDENTIALS_FILE", "/tmp/creds.json"),
            ("ALLOW_YANDEX_TRANSLATE", "no"),
        ]))
        .unwrap();

        assert_eq!(config.api_endpoint, "http://localhost:8080/tr");
        assert_eq!(config.timeout_ms, 500);
        assert_eq!(config.locale, Locale::Ru);
        assert_eq!(config.credentials_path, Some(PathBuf::from("/tmp/creds.json")));
        assert!(!config.enabled);
    }

    #[test]
    fn test_from_lookup_rejects_garbage() {
        assert!(TranslatorConfig::from_lookup(lookup_from(&[("REQUEST_TIMEOUT_MS", "soon")])).is_err());
        assert!(TranslatorConfig::from_lookup(lookup_from(&[("ALLOW_YANDEX_TRANSLATE", "maybe")])).is_err());
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = TranslatorConfig {
            locale: Locale::Ru,
            timeout_ms: 1234,
            ..Default::default()
        };
        config.to_file(&path).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_json_include!(
            actual: written,
            expected: serde_json::json!({ "locale": "ru", "timeout_ms": 1234, "enabled": true })
        );

        assert_eq!(TranslatorConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "timeout_ms": 5000 }"#).unwrap();

        let config = TranslatorConfig::load(Some(&path)).unwrap();
        assert_eq!(config.timeout_ms, 5000);
        assert_eq!(config.api_endpoint, DEFAULT_API_ENDPOINT);
    }
}
