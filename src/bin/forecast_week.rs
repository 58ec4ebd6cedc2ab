//! Print the 7-day forecast for the configured city.

use std::sync::Arc;

use anyhow::{Context, Result};
use skycast_models::{LinearLagModel, ModelSet};
use skycast_server::WeatherService;

#[tokio::main]
async fn main() -> Result<()> {
    skycast_core::init()?;

    let config = skycast_core::load_config()?;

    let model = LinearLagModel::load(&config.models.forecast_path)
        .context("Failed to load forecast model")?;
    let models = ModelSet::new(Some(Arc::new(model)), None);

    let service = WeatherService::from_config(&config, models)
        .context("Failed to initialize weather service")?;

    let forecast = service
        .forecast_week()
        .await
        .map_err(|e| {
            let hint = e.user_message();
            anyhow::Error::new(e).context(hint)
        })?;

    println!("7-day forecast for {}:", service.city());
    for (day, celsius) in forecast.iter().enumerate() {
        println!("  Day {}: {:.2}°C", day + 1, celsius);
    }
    println!("Final Forecast: {}", forecast);

    Ok(())
}
