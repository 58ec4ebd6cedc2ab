use crate::types::{CurrentConditionsResponse, TemperatureReading, WeatherError};
use reqwest::Client;
use skycast_core::{ReqwestErrorExt, WeatherConfig};
use std::time::Duration;
use tracing::instrument;

const REQUEST_TIMEOUT_SECS: u64 = 10;
const CURRENT_WEATHER_PATH: &str = "/data/2.5/weather";

/// OpenWeather current-conditions client
#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl WeatherProvider {
    pub fn new(config: &WeatherConfig) -> Result<Self, WeatherError> {
        Self::with_base_url(&config.base_url, config.api_key.clone())
    }

    pub fn with_base_url(base_url: &str, api_key: Option<String>) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| WeatherError::Network(e.into_network_error()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Fetch the current temperature for `city` in degrees Celsius.
    ///
    /// A missing API key is still sent (empty) so the provider's own 401
    /// surfaces as `ProviderUnavailable`.
    #[instrument(skip(self), level = "info")]
    pub async fn current_temperature(&self, city: &str) -> Result<TemperatureReading, WeatherError> {
        let url = format!("{}{}", self.base_url, CURRENT_WEATHER_PATH);
        let api_key = self.api_key.as_deref().unwrap_or_default();

        let response = self
            .client
            .get(&url)
            .query(&[("q", city), ("appid", api_key), ("units", "metric")])
            .send()
            .await
            .map_err(|e| WeatherError::Network(e.into_network_error()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| WeatherError::Network(e.into_network_error()))?;

        if !status.is_success() {
            tracing::warn!("Weather provider returned {}: {}", status, body);
            return Err(WeatherError::ProviderUnavailable {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: CurrentConditionsResponse = serde_json::from_str(&body)
            .map_err(|e| WeatherError::MalformedPayload(e.to_string()))?;

        tracing::debug!("Current temperature in {}: {}°C", city, parsed.main.temp);
        Ok(TemperatureReading::now(parsed.main.temp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_current_temperature() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("q", "Chennai"))
            .and(query_param("appid", "test_key"))
            .and(query_param("units", "metric"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "main": {"temp": 29.87, "feels_like": 34.1},
                "name": "Chennai"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider =
            WeatherProvider::with_base_url(&mock_server.uri(), Some("test_key".into())).unwrap();
        let reading = provider.current_temperature("Chennai").await.unwrap();

        assert_eq!(reading.celsius, 29.87);
    }

    #[tokio::test]
    async fn test_non_success_is_provider_unavailable() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(
                ResponseTemplate::new(401).set_body_string(r#"{"cod":401,"message":"Invalid API key"}"#),
            )
            .mount(&mock_server)
            .await;

        let provider = WeatherProvider::with_base_url(&mock_server.uri(), None).unwrap();
        let err = provider.current_temperature("Chennai").await.unwrap_err();

        match err {
            WeatherError::ProviderUnavailable { status, body } => {
                assert_eq!(status, 401);
                assert!(body.contains("Invalid API key"));
            }
            other => panic!("Expected ProviderUnavailable, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_key_sends_empty_appid() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(query_param("appid", ""))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = WeatherProvider::with_base_url(&mock_server.uri(), None).unwrap();
        let result = provider.current_temperature("Chennai").await;

        assert!(matches!(
            result,
            Err(WeatherError::ProviderUnavailable { status: 401, .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_temperature_is_malformed() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "main": {"humidity": 80}
            })))
            .mount(&mock_server)
            .await;

        let provider =
            WeatherProvider::with_base_url(&mock_server.uri(), Some("k".into())).unwrap();
        let err = provider.current_temperature("Chennai").await.unwrap_err();

        assert!(matches!(err, WeatherError::MalformedPayload(_)));
        assert!(!err.is_upstream());
    }

    #[tokio::test]
    async fn test_trailing_slash_in_base_url() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"main": {"temp": 25.0}})),
            )
            .mount(&mock_server)
            .await;

        let base = format!("{}/", mock_server.uri());
        let provider = WeatherProvider::with_base_url(&base, Some("k".into())).unwrap();
        let reading = provider.current_temperature("Chennai").await.unwrap();

        assert_eq!(reading.celsius, 25.0);
    }
}
