//! LogLore configuration management

use crate::client::AnalysisMode;
use crate::error::{Error, Result};
use crate::severity::SeverityConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main LogLore configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LogLoreConfig {
    /// Analysis service configuration
    pub api: ApiConfig,

    /// Health polling configuration
    pub health: HealthConfig,

    /// Severity keyword tiers
    pub severity: SeverityConfig,
}

/// Analysis service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the analysis service
    pub base_url: String,

    /// Request deadline in seconds
    pub timeout_secs: u64,

    /// Mode used when none is given on the command line
    pub default_mode: AnalysisMode,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 30,
            default_mode: AnalysisMode::Beginner,
        }
    }
}

/// Health polling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthConfig {
    /// Enable periodic health polling
    pub enabled: bool,

    /// Poll interval in seconds
    pub interval_secs: u64,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 30,
        }
    }
}

impl LogLoreConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// Load from the default path, falling back to defaults when the file
    /// does not exist
    pub fn load_or_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Default configuration file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("loglore").join("config.yaml"))
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| Error::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = LogLoreConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.api.default_mode, AnalysisMode::Beginner);
        assert!(config.health.enabled);
        assert!(!config.severity.critical_keywords.is_empty());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: LogLoreConfig = serde_yaml::from_str("api:\n  timeout_secs: 10\n").unwrap();
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.health.interval_secs, 30);
    }

    #[test]
    fn test_load_round_trip() {
        let mut config = LogLoreConfig::default();
        config.api.base_url = "https://loglore.example.com".to_string();
        config.health.enabled = false;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(config.to_yaml().unwrap().as_bytes()).unwrap();

        let loaded = LogLoreConfig::load(file.path()).unwrap();
        assert_eq!(loaded.api.base_url, "https://loglore.example.com");
        assert!(!loaded.health.enabled);
        assert_eq!(loaded.api.timeout_secs, 30);
    }

    #[test]
    fn test_invalid_yaml_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"api: [not, a, map]").unwrap();
        assert!(matches!(
            LogLoreConfig::load(file.path()),
            Err(Error::Config(_))
        ));
    }
}
