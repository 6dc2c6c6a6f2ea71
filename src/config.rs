//! Configuration handling for the wizard

use crate::services::DEFAULT_POSTAL_API;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Default delay of each simulated verification call
const DEFAULT_LATENCY_MS: u64 = 1000;
/// Default HTTP timeout for lookups and submissions
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// User configuration for the wizard, as stored on disk
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WizardConfig {
    /// Base URL of the postal PIN code API
    pub postal_api_base: Option<String>,
    /// Base URL of the registration REST endpoint
    pub registration_url: Option<String>,
    /// API key sent with registration inserts
    pub registration_api_key: Option<String>,
    /// Delay of each simulated OTP / PAN call in milliseconds
    pub simulated_latency_ms: Option<u64>,
    /// HTTP request timeout in seconds
    pub request_timeout_secs: Option<u64>,
}

impl WizardConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: WizardConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Apply environment overrides and fill in defaults
    pub fn resolve(self) -> Settings {
        self.resolve_with(|key| std::env::var(key).ok())
    }

    fn resolve_with(self, env: impl Fn(&str) -> Option<String>) -> Settings {
        Settings {
            postal_api_base: env("UDYAM_POSTAL_API")
                .or(self.postal_api_base)
                .unwrap_or_else(|| DEFAULT_POSTAL_API.to_string()),
            registration_url: env("UDYAM_REGISTRATION_URL").or(self.registration_url),
            registration_api_key: env("UDYAM_REGISTRATION_KEY").or(self.registration_api_key),
            simulated_latency: Duration::from_millis(
                self.simulated_latency_ms.unwrap_or(DEFAULT_LATENCY_MS),
            ),
            request_timeout: Duration::from_secs(
                self.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
        }
    }
}

/// Effective settings after overrides and defaults
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub postal_api_base: String,
    pub registration_url: Option<String>,
    pub registration_api_key: Option<String>,
    pub simulated_latency: Duration,
    pub request_timeout: Duration,
}

/// Platform directories for config and logs
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("in", "udyam", "udyam-tui")
}

/// Log file location, when a data directory is available
pub fn log_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_local_dir().join("udyam-tui.log"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_default_config() {
        let config = WizardConfig::default();
        assert!(config.postal_api_base.is_none());
        assert!(config.registration_url.is_none());
        assert!(config.registration_api_key.is_none());
        assert!(config.simulated_latency_ms.is_none());
        assert!(config.request_timeout_secs.is_none());
    }

    #[test]
    fn test_defaults_resolve() {
        let settings = WizardConfig::default().resolve_with(no_env);
        assert_eq!(settings.postal_api_base, DEFAULT_POSTAL_API);
        assert!(settings.registration_url.is_none());
        assert_eq!(settings.simulated_latency, Duration::from_millis(1000));
        assert_eq!(settings.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_file_values_resolve() {
        let config = WizardConfig {
            registration_url: Some("https://db.example".to_string()),
            simulated_latency_ms: Some(0),
            ..Default::default()
        };
        let settings = config.resolve_with(no_env);
        assert_eq!(settings.registration_url.as_deref(), Some("https://db.example"));
        assert_eq!(settings.simulated_latency, Duration::ZERO);
    }

    #[test]
    fn test_env_overrides_file() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("UDYAM_POSTAL_API", "http://localhost:9000"),
            ("UDYAM_REGISTRATION_KEY", "secret"),
        ]);
        let config = WizardConfig {
            postal_api_base: Some("https://ignored.example".to_string()),
            registration_api_key: Some("file-key".to_string()),
            ..Default::default()
        };
        let settings = config.resolve_with(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(settings.postal_api_base, "http://localhost:9000");
        assert_eq!(settings.registration_api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn test_serialization() {
        let config = WizardConfig {
            postal_api_base: Some("https://api.postalpincode.in".to_string()),
            registration_url: Some("https://db.example".to_string()),
            registration_api_key: Some("key".to_string()),
            simulated_latency_ms: Some(250),
            request_timeout_secs: Some(5),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: WizardConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.registration_url, Some("https://db.example".to_string()));
        assert_eq!(parsed.simulated_latency_ms, Some(250));
        assert_eq!(parsed.request_timeout_secs, Some(5));
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: WizardConfig = serde_json::from_str("{}").unwrap();
        assert!(parsed.postal_api_base.is_none());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"simulated_latency_ms": 10, "unknown_field": "value"}"#;
        let parsed: WizardConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.simulated_latency_ms, Some(10));
    }

    #[test]
    fn test_load_returns_ok() {
        // Depends on whether a config file exists, but must not error on absence
        let result = WizardConfig::load();
        assert!(result.is_ok());
    }
}
