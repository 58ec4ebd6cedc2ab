//! Current-conditions client for the OpenWeather API.
//!
//! Fetches a single Celsius reading for a city by name. No caching and no
//! retries: every call is one outbound GET.

pub mod provider;
pub mod types;

pub use provider::WeatherProvider;
pub use types::*;
