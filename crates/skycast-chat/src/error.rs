//! Chat-specific error types.
//!
//! Upstream rejections and a missing credential are not errors here: the
//! client turns them into reply text so the chat surface always answers.

use skycast_core::NetworkError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Malformed chat response: {0}")]
    MalformedResponse(String),
}

impl ChatError {
    /// User-friendly error message for display.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Network(e) => e.user_message(),
            Self::MalformedResponse(_) => "The assistant returned an unreadable answer.",
        }
    }
}
