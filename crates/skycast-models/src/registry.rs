use std::path::Path;
use std::sync::Arc;

use crate::anomaly::AnomalyModel;
use crate::artifact::{AnomalyArtifact, LinearLagModel};
use crate::error::{ModelError, ModelKind};
use crate::forecast::ForecastModel;

/// Read-only model handles, loaded once at startup and shared by reference.
///
/// A handle that failed to load stays `None`; requests needing it fail with
/// [`ModelError::NotLoaded`] while the rest of the service keeps working.
#[derive(Clone, Default)]
pub struct ModelSet {
    forecast: Option<Arc<dyn ForecastModel>>,
    anomaly: Option<Arc<dyn AnomalyModel>>,
}

impl ModelSet {
    pub fn new(
        forecast: Option<Arc<dyn ForecastModel>>,
        anomaly: Option<Arc<dyn AnomalyModel>>,
    ) -> Self {
        Self { forecast, anomaly }
    }

    /// Load both artifacts. Failures are logged, not returned.
    pub fn load(forecast_path: &Path, anomaly_path: &Path) -> Self {
        let forecast = match LinearLagModel::load(forecast_path) {
            Ok(model) => {
                tracing::info!("Loaded forecast model from {}", forecast_path.display());
                Some(Arc::new(model) as Arc<dyn ForecastModel>)
            }
            Err(e) => {
                tracing::error!("Model load error: {}", e);
                None
            }
        };

        let anomaly = match AnomalyArtifact::load(anomaly_path) {
            Ok(model) => {
                tracing::info!("Loaded anomaly model from {}", anomaly_path.display());
                Some(Arc::new(model) as Arc<dyn AnomalyModel>)
            }
            Err(e) => {
                tracing::error!("Model load error: {}", e);
                None
            }
        };

        Self { forecast, anomaly }
    }

    pub fn forecast(&self) -> Result<&dyn ForecastModel, ModelError> {
        self.forecast
            .as_deref()
            .ok_or(ModelError::NotLoaded(ModelKind::Forecast))
    }

    pub fn anomaly(&self) -> Result<&dyn AnomalyModel, ModelError> {
        self.anomaly
            .as_deref()
            .ok_or(ModelError::NotLoaded(ModelKind::Anomaly))
    }
}

impl std::fmt::Debug for ModelSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelSet")
            .field("forecast_loaded", &self.forecast.is_some())
            .field("anomaly_loaded", &self.anomaly.is_some())
            .finish()
    }
}
