use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which of the two pre-trained artifacts an error concerns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    Forecast,
    Anomaly,
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelKind::Forecast => write!(f, "Forecast"),
            ModelKind::Anomaly => write!(f, "Anomaly"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ModelError {
    /// Artifact could not be read, parsed, or validated
    #[error("{kind} model unavailable at {}: {reason}", path.display())]
    Unavailable {
        kind: ModelKind,
        path: PathBuf,
        reason: String,
    },

    /// No handle was loaded at startup
    #[error("{0} model not loaded")]
    NotLoaded(ModelKind),

    #[error("Non-finite seed temperature: {0}")]
    NonFiniteInput(f64),

    #[error("Model produced non-finite value {value} at step {step}")]
    NonFinitePrediction { step: usize, value: f64 },
}

impl ModelError {
    /// True when the request cannot proceed because a model is missing
    pub fn is_unavailable(&self) -> bool {
        matches!(self, ModelError::Unavailable { .. } | ModelError::NotLoaded(_))
    }
}
