//! Loading artifacts from disk and running them through the engine.

use skycast_models::{
    classify, forecast, AnomalyLabel, ModelError, ModelKind, ModelSet, FORECAST_HORIZON,
};
use std::path::Path;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_load_both_models_and_run() {
    let dir = TempDir::new().unwrap();
    let forecast_path = write(
        &dir,
        "forecast_model.json",
        r#"{"kind": "linear_lag", "intercept": 1.2, "coefficients": [0.6, 0.25, 0.1]}"#,
    );
    let anomaly_path = write(
        &dir,
        "anomaly.json",
        r#"{"kind": "envelope", "lower": 20.0, "upper": 40.0}"#,
    );

    let models = ModelSet::load(&forecast_path, &anomaly_path);

    let sequence = forecast(30.0, models.forecast().unwrap()).unwrap();
    assert_eq!(sequence.values().len(), FORECAST_HORIZON);
    assert_eq!(sequence.values()[0], 29.7);
    assert_eq!(sequence.values()[1], 29.52);

    let anomaly = models.anomaly().unwrap();
    assert_eq!(classify(30.0, anomaly), AnomalyLabel::Normal);
    assert_eq!(classify(45.0, anomaly), AnomalyLabel::Anomalous);
}

#[test]
fn test_missing_artifacts_leave_handles_empty() {
    let models = ModelSet::load(
        Path::new("/nonexistent/forecast_model.json"),
        Path::new("/nonexistent/anomaly.json"),
    );

    assert!(matches!(
        models.forecast(),
        Err(ModelError::NotLoaded(ModelKind::Forecast))
    ));
    assert!(matches!(
        models.anomaly(),
        Err(ModelError::NotLoaded(ModelKind::Anomaly))
    ));
}

#[test]
fn test_one_bad_artifact_does_not_block_the_other() {
    let dir = TempDir::new().unwrap();
    let forecast_path = write(&dir, "forecast_model.json", "garbage");
    let anomaly_path = write(
        &dir,
        "anomaly.json",
        r#"{"kind": "gaussian", "mean": 29.0, "std_dev": 2.0, "z_threshold": 3.0}"#,
    );

    let models = ModelSet::load(&forecast_path, &anomaly_path);

    assert!(models.forecast().is_err());
    assert!(models.anomaly().is_ok());
}
