//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use menulint_analyzer::AnalyzerConfig;
use menulint_llm::gemini::{DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT_SECS};
use menulint_llm::{GeminiConfig, RetryPolicy};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Fallback environment variable for the credential
pub const FALLBACK_KEY_VAR: &str = "API_KEY";

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Gemini API key; the environment takes precedence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Model endpoint settings
    #[serde(default)]
    pub model: ModelSettings,

    /// Analysis limits
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Model endpoint settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSettings {
    /// Model name
    #[serde(default = "default_model")]
    pub name: String,

    /// API base URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Constrain output to the response schema
    #[serde(default = "default_true")]
    pub schema_enforcement: bool,

    /// Per-attempt timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Retry budget and backoff
    #[serde(default)]
    pub retry: RetryPolicy,
}

/// Global CLI settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One card per finding
    Card,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".menulint").join("config.toml"))
    }

    /// Resolve the configuration file path, honoring an explicit override.
    pub fn path(explicit: Option<&Path>) -> Result<PathBuf> {
        match explicit {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::default_path(),
        }
    }

    /// Load configuration from file, or defaults if it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file.
    pub fn save(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Validate values that can be checked without a credential.
    pub fn validate(&self) -> Result<()> {
        if self.model.name.trim().is_empty() {
            return Err(CliError::Config("model.name must not be empty".into()));
        }
        if self.model.request_timeout_secs == 0 {
            return Err(CliError::Config(
                "model.request_timeout_secs must be greater than 0".into(),
            ));
        }
        self.model.retry.validate().map_err(CliError::Config)?;
        self.analyzer.validate().map_err(CliError::Config)
    }

    /// Pick the credential: flag or `GEMINI_API_KEY`, then `API_KEY`, then the file.
    ///
    /// Blank candidates are skipped.
    pub fn resolve_api_key(&self, flag: Option<String>) -> Option<String> {
        let present = |key: &String| !key.trim().is_empty();
        flag.filter(present)
            .or_else(|| std::env::var(FALLBACK_KEY_VAR).ok().filter(present))
            .or_else(|| self.api_key.clone().filter(present))
    }

    /// Apply command-line overrides and validate the result.
    pub fn apply_overrides(&mut self, model: Option<String>, max_retries: Option<u32>) -> Result<()> {
        if let Some(model) = model {
            self.model.name = model;
        }
        if let Some(max_retries) = max_retries {
            self.model.retry.max_retries = max_retries;
        }
        self.validate()
    }

    /// Build the model client settings for the given credential.
    pub fn gemini_config(&self, api_key: impl Into<String>) -> GeminiConfig {
        GeminiConfig {
            api_key: api_key.into(),
            endpoint: self.model.endpoint.clone(),
            model: self.model.name.clone(),
            temperature: self.model.temperature,
            schema_enforcement: self.model.schema_enforcement,
            request_timeout_secs: self.model.request_timeout_secs,
            retry: self.model.retry.clone(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: ModelSettings::default(),
            analyzer: AnalyzerConfig::default(),
            settings: Settings::default(),
        }
    }
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            name: default_model(),
            endpoint: default_endpoint(),
            temperature: default_temperature(),
            schema_enforcement: true,
            request_timeout_secs: default_request_timeout_secs(),
            retry: RetryPolicy::default(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Card,
        }
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Card
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.model.name, "gemini-2.5-flash");
        assert_eq!(config.model.retry.max_retries, 3);
        assert!(config.settings.color);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.model.name = "gemini-2.5-pro".to_string();
        config.settings.format = OutputFormat::Json;
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Config::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[model.retry]\nmax_retries = 5\n").unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.model.retry.max_retries, 5);
        assert_eq!(loaded.model.retry.base_delay_ms, 1_000);
        assert_eq!(loaded.analyzer, AnalyzerConfig::default());
    }

    #[test]
    fn test_invalid_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[model.retry]\nmax_retries = 0\n").unwrap();

        assert!(matches!(Config::load(&path), Err(CliError::Config(_))));
    }

    #[test]
    fn test_blank_flag_key_falls_through() {
        let config = Config {
            api_key: Some("from-file".to_string()),
            ..Config::default()
        };
        let resolved = config.resolve_api_key(Some("  ".to_string()));
        // API_KEY from the environment may win over the file; a blank flag never does
        assert!(resolved.is_some_and(|key| !key.trim().is_empty()));
    }

    #[test]
    fn test_overrides_are_validated() {
        let mut config = Config::default();
        config
            .apply_overrides(Some("gemini-2.5-pro".to_string()), Some(5))
            .unwrap();
        assert_eq!(config.model.name, "gemini-2.5-pro");
        assert_eq!(config.model.retry.max_retries, 5);

        let mut config = Config::default();
        assert!(matches!(
            config.apply_overrides(None, Some(0)),
            Err(CliError::Config(_))
        ));

        let mut config = Config::default();
        assert!(matches!(
            config.apply_overrides(Some(" ".to_string()), None),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn test_flag_key_wins() {
        let config = Config {
            api_key: Some("from-file".to_string()),
            ..Config::default()
        };
        assert_eq!(
            config.resolve_api_key(Some("from-flag".to_string())).as_deref(),
            Some("from-flag")
        );
    }

    #[test]
    fn test_gemini_config_carries_settings() {
        let mut config = Config::default();
        config.model.retry.max_retries = 7;
        let gemini = config.gemini_config("k");
        assert_eq!(gemini.api_key, "k");
        assert_eq!(gemini.retry.max_retries, 7);
        assert!(gemini.validate().is_ok());
    }

    #[test]
    fn test_api_key_not_written_when_unset() {
        let toml = Config::default().to_toml().unwrap();
        assert!(!toml.contains("api_key"));
    }
}
