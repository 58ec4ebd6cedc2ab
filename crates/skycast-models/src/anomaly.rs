use serde::Serialize;

/// Raw label a one-class model emits for an in-distribution input
pub const RAW_NORMAL: i32 = 1;
/// Raw label a one-class model emits for an outlier
pub const RAW_ANOMALOUS: i32 = -1;

/// A pre-trained one-class detector over a single temperature feature.
///
/// Returns the raw label; only `RAW_ANOMALOUS` is treated as an outlier.
pub trait AnomalyModel: Send + Sync {
    fn predict(&self, temperature: f64) -> i32;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnomalyLabel {
    Normal,
    Anomalous,
}

impl AnomalyLabel {
    pub fn is_anomaly(&self) -> bool {
        matches!(self, AnomalyLabel::Anomalous)
    }

    pub fn message(&self) -> &'static str {
        match self {
            AnomalyLabel::Normal => "✅ Temperature is Normal",
            AnomalyLabel::Anomalous => "⚠️ Anomaly Detected!",
        }
    }
}

/// Label a single temperature. Raw `-1` is anomalous, anything else is normal.
pub fn classify<M>(temperature: f64, model: &M) -> AnomalyLabel
where
    M: AnomalyModel + ?Sized,
{
    let raw = model.predict(temperature);
    tracing::debug!(temperature, raw, "Anomaly model output");

    if raw == RAW_ANOMALOUS {
        AnomalyLabel::Anomalous
    } else {
        AnomalyLabel::Normal
    }
}
