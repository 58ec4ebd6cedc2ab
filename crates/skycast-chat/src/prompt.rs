//! Prompt templates for the forecast assistant.

use skycast_models::ForecastSequence;

pub fn system_prompt(city: &str) -> String {
    format!(
        "You are a weather disaster risk analysis assistant for {city}. \
         You have access to a 7-day ML temperature forecast. \
         Analyze disaster risks and answer weather questions in a clear, friendly way. \
         Keep responses concise, under 150 words."
    )
}

pub fn user_prompt(city: &str, forecast: &ForecastSequence, question: &str) -> String {
    format!(
        "7-Day Temperature Forecast for {city}: {forecast}\n\
         \n\
         User Question: {question}\n\
         \n\
         Instructions:\n\
         1. First briefly analyze if this forecast resembles any historical weather disasters \
         (floods, cyclones, heatwaves, storms). Keep this to 2-3 sentences.\n\
         2. Then answer the user's question in a friendly, helpful way.\n\
         3. Keep the total response concise and readable.\n"
    )
}
