//! Inference side of Skycast: the autoregressive 7-day forecast recurrence,
//! the one-class anomaly classifier, and loading of pre-trained artifacts.
//!
//! Training is out of scope. Artifacts are read once at startup and shared
//! read-only through [`ModelSet`].

pub mod anomaly;
pub mod artifact;
pub mod error;
pub mod forecast;
pub mod registry;

pub use anomaly::{classify, AnomalyLabel, AnomalyModel, RAW_ANOMALOUS, RAW_NORMAL};
pub use artifact::{AnomalyArtifact, LinearLagModel};
pub use error::{ModelError, ModelKind};
pub use forecast::{forecast, round_to_cents, ForecastModel, ForecastSequence, LagWindow, FORECAST_HORIZON};
pub use registry::ModelSet;
