//! Request-scoped orchestration shared by the HTTP routes and the CLI tools.
//!
//! Every call fetches a fresh reading; nothing is cached between calls.

use serde::Serialize;
use skycast_chat::{ChatClient, ChatError};
use skycast_core::Config;
use skycast_models::{classify, forecast, round_to_cents, AnomalyLabel, ForecastSequence, ModelError, ModelSet};
use skycast_weather::{WeatherError, WeatherProvider};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Weather(#[from] WeatherError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Chat(#[from] ChatError),
}

impl ServiceError {
    /// Short explanation for terminal users; `Display` keeps the details.
    pub fn user_message(&self) -> &'static str {
        match self {
            ServiceError::Weather(e) => e.user_message(),
            ServiceError::Model(e) if e.is_unavailable() => {
                "Prediction model is not available. Check the model files."
            }
            ServiceError::Model(_) => "The model could not make a prediction for the current reading.",
            ServiceError::Chat(e) => e.user_message(),
        }
    }
}

/// Current temperature with its classification
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnomalyReport {
    /// Rounded to 2 dp
    pub current_temp_celsius: f64,
    pub label: AnomalyLabel,
}

pub struct WeatherService {
    city: String,
    provider: WeatherProvider,
    models: ModelSet,
    chat: ChatClient,
}

impl WeatherService {
    pub fn new(city: impl Into<String>, provider: WeatherProvider, models: ModelSet, chat: ChatClient) -> Self {
        Self {
            city: city.into(),
            provider,
            models,
            chat,
        }
    }

    /// Build clients from configuration; `models` are loaded by the caller.
    pub fn from_config(config: &Config, models: ModelSet) -> Result<Self, ServiceError> {
        let provider = WeatherProvider::new(&config.weather)?;
        let chat = ChatClient::new(&config.chat, &config.city)?;
        Ok(Self::new(config.city.clone(), provider, models, chat))
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    /// Seven-day forecast seeded with the current temperature.
    ///
    /// The model is checked before the provider is called, so a missing
    /// model never costs an outbound request.
    pub async fn forecast_week(&self) -> Result<ForecastSequence, ServiceError> {
        let model = self.models.forecast()?;
        let reading = self.provider.current_temperature(&self.city).await?;
        let sequence = forecast(reading.celsius, model)?;

        tracing::info!(
            city = %self.city,
            seed = reading.celsius,
            observed_at = %reading.observed_at,
            "Forecast generated"
        );
        Ok(sequence)
    }

    pub async fn check_anomaly(&self) -> Result<AnomalyReport, ServiceError> {
        let model = self.models.anomaly()?;
        let reading = self.provider.current_temperature(&self.city).await?;
        let label = classify(reading.celsius, model);

        if label.is_anomaly() {
            tracing::warn!(
                city = %self.city,
                temperature = reading.celsius,
                observed_at = %reading.observed_at,
                "Temperature anomaly detected"
            );
        }

        Ok(AnomalyReport {
            current_temp_celsius: round_to_cents(reading.celsius),
            label,
        })
    }

    /// Forecast the week, then ask the assistant about it.
    pub async fn chat(&self, message: &str) -> Result<String, ServiceError> {
        let sequence = self.forecast_week().await?;
        self.summarize(&sequence, message).await
    }

    /// Ask the assistant about an already-computed forecast.
    pub async fn summarize(&self, sequence: &ForecastSequence, message: &str) -> Result<String, ServiceError> {
        Ok(self.chat.summarize(sequence, message).await?)
    }
}

impl std::fmt::Debug for WeatherService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherService")
            .field("city", &self.city)
            .field("models", &self.models)
            .field("chat_configured", &self.chat.has_credential())
            .finish()
    }
}
