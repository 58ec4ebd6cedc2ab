//! On-disk model artifacts.
//!
//! Each artifact is a JSON document describing an already-fitted estimator,
//! tagged by `kind`. Parameters are validated on load so a bad file is
//! reported at startup rather than at the first request.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::anomaly::{AnomalyModel, RAW_ANOMALOUS, RAW_NORMAL};
use crate::error::{ModelError, ModelKind};
use crate::forecast::ForecastModel;

/// Linear regression over `(lag1, lag2, lag3)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename = "linear_lag")]
pub struct LinearLagModel {
    pub intercept: f64,
    pub coefficients: [f64; 3],
}

impl LinearLagModel {
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let model: Self = read_json(path, ModelKind::Forecast)?;

        let finite = model.intercept.is_finite() && model.coefficients.iter().all(|c| c.is_finite());
        if !finite {
            return Err(unavailable(
                ModelKind::Forecast,
                path,
                "parameters must be finite",
            ));
        }

        Ok(model)
    }
}

impl ForecastModel for LinearLagModel {
    fn predict(&self, lag1: f64, lag2: f64, lag3: f64) -> f64 {
        self.intercept
            + self.coefficients[0] * lag1
            + self.coefficients[1] * lag2
            + self.coefficients[2] * lag3
    }
}

/// Fitted one-class detector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnomalyArtifact {
    /// Inside `[lower, upper]` is normal
    Envelope { lower: f64, upper: f64 },
    /// Within `z_threshold` standard deviations of `mean` is normal
    Gaussian {
        mean: f64,
        std_dev: f64,
        z_threshold: f64,
    },
}

impl AnomalyArtifact {
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let artifact: Self = read_json(path, ModelKind::Anomaly)?;
        artifact
            .validate()
            .map_err(|reason| unavailable(ModelKind::Anomaly, path, reason))?;
        Ok(artifact)
    }

    fn validate(&self) -> Result<(), &'static str> {
        match *self {
            AnomalyArtifact::Envelope { lower, upper } => {
                if !lower.is_finite() || !upper.is_finite() {
                    return Err("bounds must be finite");
                }
                if lower > upper {
                    return Err("lower bound exceeds upper bound");
                }
            }
            AnomalyArtifact::Gaussian {
                mean,
                std_dev,
                z_threshold,
            } => {
                if !mean.is_finite() || !std_dev.is_finite() || !z_threshold.is_finite() {
                    return Err("parameters must be finite");
                }
                if std_dev <= 0.0 {
                    return Err("std_dev must be positive");
                }
                if z_threshold <= 0.0 {
                    return Err("z_threshold must be positive");
                }
            }
        }
        Ok(())
    }
}

impl AnomalyModel for AnomalyArtifact {
    fn predict(&self, temperature: f64) -> i32 {
        let inside = match *self {
            AnomalyArtifact::Envelope { lower, upper } => (lower..=upper).contains(&temperature),
            AnomalyArtifact::Gaussian {
                mean,
                std_dev,
                z_threshold,
            } => ((temperature - mean) / std_dev).abs() <= z_threshold,
        };

        if inside {
            RAW_NORMAL
        } else {
            RAW_ANOMALOUS
        }
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, kind: ModelKind) -> Result<T, ModelError> {
    let contents =
        std::fs::read_to_string(path).map_err(|e| unavailable(kind, path, e.to_string()))?;
    serde_json::from_str(&contents).map_err(|e| unavailable(kind, path, e.to_string()))
}

fn unavailable(kind: ModelKind, path: &Path, reason: impl Into<String>) -> ModelError {
    ModelError::Unavailable {
        kind,
        path: path.to_path_buf(),
        reason: reason.into(),
    }
}
