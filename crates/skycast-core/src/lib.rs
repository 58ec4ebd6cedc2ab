pub mod config;
pub mod error;

pub use config::{ChatConfig, Config, ModelsConfig, ValidationResult, WeatherConfig};
pub use error::{ConfigError, NetworkError, ReqwestErrorExt};

use anyhow::Result;

/// Initialize logging and load `.env` into the process environment.
pub fn init() -> Result<()> {
    // A missing .env is the normal case in deployments
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Failed to read .env file: {}", e);
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Skycast core initialized");
    Ok(())
}

/// Load and validate configuration for a binary.
///
/// The error leads with the user-facing explanation and keeps the detailed
/// cause underneath.
pub fn load_config() -> Result<Config> {
    let (config, _) = Config::load_validated().map_err(|e| {
        let hint = e.user_message();
        anyhow::Error::new(e).context(hint)
    })?;
    Ok(config)
}
