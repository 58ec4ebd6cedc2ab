//! Interactive assistant: forecast once, then answer questions about it.

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use skycast_models::{LinearLagModel, ModelSet};
use skycast_server::WeatherService;
use tokio::io::{AsyncBufReadExt, BufReader};

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

    println!("Weather Disaster Risk Assistant for {}", service.city());
    println!("\n7-Day Forecast: {}", forecast);
    println!("\nType 'exit' to quit.\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("You: ");
        std::io::stdout().flush().context("Failed to flush stdout")?;

        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            break;
        };
        let question = line.trim();

        if question.is_empty() {
            continue;
        }
        if question.eq_ignore_ascii_case("exit") {
            println!("Exiting Weather Assistant.");
            break;
        }

        match service.summarize(&forecast, question).await {
            Ok(answer) => println!("\nAI:\n{}", answer),
            Err(e) => {
                tracing::error!("Chat request failed: {}", e);
                println!("\nAI:\n{}", e.user_message());
            }
        }
        println!("\n{}\n", "-".repeat(60));
    }

    Ok(())
}
