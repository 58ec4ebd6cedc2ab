use std::sync::Arc;

use anyhow::{Context, Result};
use skycast_models::ModelSet;
use skycast_server::WeatherService;

#[tokio::main]
async fn main() -> Result<()> {
    skycast_core::init()?;

    let config = skycast_core::load_config()?;

    // Loaded once; a missing artifact disables only the routes that need it
    let models = ModelSet::load(&config.models.forecast_path, &config.models.anomaly_path);

    let service = WeatherService::from_config(&config, models)
        .context("Failed to initialize weather service")?;

    tracing::info!("{} Weather API starting", config.city);

    skycast_server::serve(Arc::new(service), config.bind_addr)
        .await
        .context("HTTP server failed")?;

    Ok(())
}
