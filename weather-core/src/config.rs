use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Environment variable consulted before the config file.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Settings for the OpenWeather provider.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ProviderConfig {
    pub api_key: String,

    /// Overrides the API host, e.g. for a proxy or a local mock.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// [openweather]
/// api_key = "..."
/// timeout_secs = 10
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openweather: Option<ProviderConfig>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-finder", "weather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Set/replace the API key, keeping any other provider settings.
    pub fn set_api_key(&mut self, api_key: String) {
        self.openweather.get_or_insert_with(ProviderConfig::default).api_key = api_key;
    }

    /// Replace the base URL; `None` restores the default host.
    pub fn set_base_url(&mut self, base_url: Option<String>) {
        self.openweather.get_or_insert_with(ProviderConfig::default).base_url = base_url;
    }

    /// Returns the API key, if a non-blank one is configured.
    pub fn api_key(&self) -> Option<&str> {
        self.openweather
            .as_ref()
            .map(|cfg| cfg.api_key.trim())
            .filter(|key| !key.is_empty())
    }

    /// Apply a key supplied at startup (flag or environment), which wins over the file.
    pub fn with_api_key_override(mut self, api_key: Option<String>) -> Self {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.set_api_key(key);
        }
        self
    }

    pub fn base_url(&self) -> &str {
        self.openweather
            .as_ref()
            .and_then(|cfg| cfg.base_url.as_deref())
            .map(|url| url.trim_end_matches('/'))
            .unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn timeout(&self) -> Duration {
        let secs = self
            .openweather
            .as_ref()
            .and_then(|cfg| cfg.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Duration::from_secs(secs)
    }

    pub fn is_configured(&self) -> bool {
        self.api_key().is_some()
    }
}
