//! Classify the current temperature of the configured city.

use std::sync::Arc;

use anyhow::{Context, Result};
use skycast_models::{AnomalyArtifact, ModelSet};
use skycast_server::WeatherService;

#[tokio::main]
async fn main() -> Result<()> {
    skycast_core::init()?;

    let config = skycast_core::load_config()?;

    let model = AnomalyArtifact::load(&config.models.anomaly_path)
        .context("Failed to load anomaly model")?;
    let models = ModelSet::new(None, Some(Arc::new(model)));

    let service = WeatherService::from_config(&config, models)
        .context("Failed to initialize weather service")?;

    let report = service
        .check_anomaly()
        .await
        .map_err(|e| {
            let hint = e.user_message();
            anyhow::Error::new(e).context(hint)
        })?;

    println!(
        "{}: {:.2}°C - {}",
        service.city(),
        report.current_temp_celsius,
        report.label.message()
    );

    Ok(())
}
