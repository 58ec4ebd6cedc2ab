//! Groq chat-completion client used to narrate a 7-day forecast.

pub mod client;
pub mod error;
pub mod prompt;
pub mod types;

pub use client::{ChatClient, MISSING_KEY_REPLY};
pub use error::ChatError;
