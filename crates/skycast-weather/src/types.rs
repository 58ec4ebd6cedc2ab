use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use skycast_core::NetworkError;

/// A single current-temperature observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureReading {
    pub celsius: f64,
    pub observed_at: DateTime<Utc>,
}

impl TemperatureReading {
    pub fn now(celsius: f64) -> Self {
        Self {
            celsius,
            observed_at: Utc::now(),
        }
    }
}

/// Subset of the OpenWeather `/data/2.5/weather` response we read
#[derive(Debug, Deserialize)]
pub(crate) struct CurrentConditionsResponse {
    pub main: MainBlock,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MainBlock {
    pub temp: f64,
}

/// Weather provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    /// Provider answered with a non-success status
    #[error("Weather provider error {status}: {body}")]
    ProviderUnavailable { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    /// Success status but the body lacks a numeric `main.temp`
    #[error("Malformed weather payload: {0}")]
    MalformedPayload(String),
}

impl WeatherError {
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::ProviderUnavailable { status: 401, .. } => {
                "Weather API key is invalid or missing."
            }
            WeatherError::ProviderUnavailable { status: 404, .. } => "City not found.",
            WeatherError::ProviderUnavailable { .. } => {
                "Weather service unavailable. Please try again later."
            }
            WeatherError::Network(e) => e.user_message(),
            WeatherError::MalformedPayload(_) => "Weather service returned unexpected data.",
        }
    }

    /// Whether the failure lies with the upstream provider rather than with us
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            WeatherError::ProviderUnavailable { .. } | WeatherError::Network(_)
        )
    }
}
