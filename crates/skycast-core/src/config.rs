use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::ConfigError;

/// Environment variable holding the OpenWeather API key
pub const OPENWEATHER_API_KEY_VAR: &str = "OPENWEATHER_API_KEY";
/// Environment variable holding the Groq API key
pub const GROQ_API_KEY_VAR: &str = "GROQ_API_KEY";
/// Environment variable overriding the config file location
pub const CONFIG_PATH_VAR: &str = "SKYCAST_CONFIG";

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a single-line summary of all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// City whose weather is forecast
    #[serde(default = "default_city")]
    pub city: String,

    /// Address the HTTP service listens on
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,

    #[serde(default)]
    pub weather: WeatherConfig,

    #[serde(default)]
    pub chat: ChatConfig,

    #[serde(default)]
    pub models: ModelsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// OpenWeather API root
    pub base_url: String,

    /// Taken from `OPENWEATHER_API_KEY` only
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openweathermap.org".to_string(),
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Groq API root (OpenAI-compatible routes live under `/openai/v1`)
    pub base_url: String,

    pub model: String,

    /// Sampling temperature passed to the completion endpoint
    pub temperature: f64,

    /// Taken from `GROQ_API_KEY` only
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.groq.com".to_string(),
            model: "llama-3.3-70b-versatile".to_string(),
            temperature: 0.7,
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelsConfig {
    /// Serialized three-lag regression artifact
    pub forecast_path: PathBuf,

    /// Serialized one-class detector artifact
    pub anomaly_path: PathBuf,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            forecast_path: PathBuf::from("models/forecast_model.json"),
            anomaly_path: PathBuf::from("models/anomaly.json"),
        }
    }
}

fn default_city() -> String {
    "Chennai".to_string()
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8000))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            city: default_city(),
            bind_addr: default_bind_addr(),
            weather: WeatherConfig::default(),
            chat: ChatConfig::default(),
            models: ModelsConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file (defaults if absent) and apply credentials
    /// from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();

        let mut config = if config_path.exists() {
            tracing::debug!("Loading config from {}", config_path.display());
            Self::from_file(&config_path)?
        } else {
            tracing::debug!(
                "No config file at {}, using defaults",
                config_path.display()
            );
            Self::default()
        };

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Warnings are logged; errors fail the load.
    pub fn load_validated() -> Result<(Self, ValidationResult), ConfigError> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()));
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Fill credentials from an environment lookup. Empty values count as unset.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        self.weather.api_key = non_empty(OPENWEATHER_API_KEY_VAR);
        self.chat.api_key = non_empty(GROQ_API_KEY_VAR);
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        if self.city.trim().is_empty() {
            result.add_error("city", "City must not be empty");
        }

        validate_url(&self.weather.base_url, "weather.base_url", &mut result);
        validate_url(&self.chat.base_url, "chat.base_url", &mut result);

        if self.chat.model.trim().is_empty() {
            result.add_error("chat.model", "Chat model identifier must not be empty");
        }

        if !self.chat.temperature.is_finite() || self.chat.temperature < 0.0 {
            result.add_error("chat.temperature", "Temperature must be a non-negative number");
        } else if self.chat.temperature > 2.0 {
            result.add_warning("chat.temperature", "Temperature above 2.0 is unusually high");
        }

        if self.weather.api_key.is_none() {
            result.add_warning(
                "weather.api_key",
                format!("{} not set - weather requests will be rejected", OPENWEATHER_API_KEY_VAR),
            );
        }

        if self.chat.api_key.is_none() {
            result.add_warning(
                "chat.api_key",
                format!("{} not set - chat replies will be a placeholder", GROQ_API_KEY_VAR),
            );
        }

        for (field, path) in [
            ("models.forecast_path", &self.models.forecast_path),
            ("models.anomaly_path", &self.models.anomaly_path),
        ] {
            if !path.exists() {
                result.add_warning(field, format!("Model file not found: {}", path.display()));
            }
        }

        result
    }

    /// Path of the configuration file: `SKYCAST_CONFIG`, else the platform config dir.
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var(CONFIG_PATH_VAR) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("skycast")
            .join("config.toml")
    }
}

fn validate_url(url_str: &str, field_name: &str, result: &mut ValidationResult) {
    match Url::parse(url_str) {
        Ok(url) => {
            if url.scheme() != "http" && url.scheme() != "https" {
                result.add_error(
                    field_name,
                    format!("URL must use http or https scheme, got: {}", url.scheme()),
                );
            }

            if url.host().is_none() {
                result.add_error(field_name, "URL must have a host");
            }
        }
        Err(e) => {
            result.add_error(field_name, format!("Invalid URL: {}", e));
        }
    }
}
