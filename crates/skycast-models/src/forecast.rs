//! Seven-step autoregressive forecast over a three-slot lag window.
//!
//! Only one observation exists (the current temperature), so the window is
//! seeded by repeating it three times. Each step feeds the model's raw
//! prediction back into the window; rounding applies to the returned values
//! only. Feeding the rounded value back produces different numbers.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ModelError;

/// Number of days produced by [`forecast`]
pub const FORECAST_HORIZON: usize = 7;

/// A pre-trained next-value regressor over three lags.
///
/// `lag1` is the most recent value and `lag3` the oldest.
pub trait ForecastModel: Send + Sync {
    fn predict(&self, lag1: f64, lag2: f64, lag3: f64) -> f64;
}

/// Ordered lag buffer, most recent first
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LagWindow {
    lags: [f64; 3],
}

impl LagWindow {
    /// Window with every slot set to `seed`
    pub fn seeded(seed: f64) -> Self {
        Self { lags: [seed; 3] }
    }

    /// `(lag1, lag2, lag3)`
    pub fn lags(&self) -> (f64, f64, f64) {
        (self.lags[0], self.lags[1], self.lags[2])
    }

    /// Shift in a new most-recent value, dropping the oldest
    pub fn push(&mut self, value: f64) {
        self.lags = [value, self.lags[0], self.lags[1]];
    }
}

/// Predicted temperatures for days 1..=7 after the reading, rounded to 2 dp
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ForecastSequence([f64; FORECAST_HORIZON]);

impl ForecastSequence {
    /// Build a sequence from already-computed values, rounding each to 2 dp
    pub fn from_values(values: [f64; FORECAST_HORIZON]) -> Self {
        Self(values.map(round_to_cents))
    }

    pub fn values(&self) -> &[f64; FORECAST_HORIZON] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }
}

impl fmt::Display for ForecastSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}", value)?;
        }
        write!(f, "]")
    }
}

/// Round to two decimal places.
///
/// Rounds the exact binary value, breaking exact ties to even, so `0.125`
/// becomes `0.12` and `1.115` (stored just below) becomes `1.11`.
pub fn round_to_cents(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

/// Run the recurrence from a single seed temperature.
///
/// # Errors
///
/// `NonFiniteInput` for a NaN/infinite seed, `NonFinitePrediction` if the
/// model emits a NaN/infinite value at any step.
pub fn forecast<M>(seed: f64, model: &M) -> Result<ForecastSequence, ModelError>
where
    M: ForecastModel + ?Sized,
{
    if !seed.is_finite() {
        return Err(ModelError::NonFiniteInput(seed));
    }

    let mut window = LagWindow::seeded(seed);
    let mut values = [0.0; FORECAST_HORIZON];

    for (step, slot) in values.iter_mut().enumerate() {
        let (lag1, lag2, lag3) = window.lags();
        let predicted = model.predict(lag1, lag2, lag3);

        if !predicted.is_finite() {
            return Err(ModelError::NonFinitePrediction {
                step: step + 1,
                value: predicted,
            });
        }

        *slot = round_to_cents(predicted);
        window.push(predicted);
    }

    tracing::debug!(seed, forecast = ?values, "Forecast computed");
    Ok(ForecastSequence(values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Identity;

    impl ForecastModel for Identity {
        fn predict(&self, lag1: f64, _lag2: f64, _lag3: f64) -> f64 {
            lag1
        }
    }

    /// Adds a fractional step to lag1 and records every window it sees
    struct Recording {
        step: f64,
        seen: Mutex<Vec<(f64, f64, f64)>>,
    }

    impl Recording {
        fn new(step: f64) -> Self {
            Self {
                step,
                seen: Mutex::new(Vec::new()),
            }
        }

        fn seen(&self) -> Vec<(f64, f64, f64)> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl ForecastModel for Recording {
        fn predict(&self, lag1: f64, lag2: f64, lag3: f64) -> f64 {
            self.seen.lock().unwrap().push((lag1, lag2, lag3));
            lag1 + self.step
        }
    }

    struct Weighted;

    impl ForecastModel for Weighted {
        fn predict(&self, lag1: f64, lag2: f64, lag3: f64) -> f64 {
            1.2 + 0.6 * lag1 + 0.25 * lag2 + 0.1 * lag3
        }
    }

    struct BlowsUpAt(usize, Mutex<usize>);

    impl ForecastModel for BlowsUpAt {
        fn predict(&self, lag1: f64, _lag2: f64, _lag3: f64) -> f64 {
            let mut calls = self.1.lock().unwrap();
            *calls += 1;
            if *calls == self.0 {
                f64::NAN
            } else {
                lag1
            }
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_always_seven_values() {
        for seed in [-40.0, -0.5, 0.0, 12.345, 31.4, 55.0] {
            let result = forecast(seed, &Identity).unwrap();
            assert_eq!(result.values().len(), FORECAST_HORIZON);
            assert_eq!(result.iter().count(), 7);
        }
    }

    #[test]
    fn test_identity_model_repeats_seed() {
        for seed in [-3.25, 0.0, 28.0, 36.75] {
            let result = forecast(seed, &Identity).unwrap();
            assert_eq!(result.values(), &[seed; 7]);
        }
    }

    #[test]
    fn test_window_is_seeded_with_current_temperature() {
        let model = Recording::new(0.0);
        forecast(27.5, &model).unwrap();
        assert_eq!(model.seen()[0], (27.5, 27.5, 27.5));
    }

    #[test]
    fn test_model_queried_once_per_step() {
        let model = Recording::new(1.0);
        forecast(10.0, &model).unwrap();
        assert_eq!(model.seen().len(), FORECAST_HORIZON);
    }

    #[test]
    fn test_window_shifts_most_recent_first() {
        let model = Recording::new(1.0);
        forecast(10.0, &model).unwrap();
        let seen = model.seen();
        assert_eq!(seen[1], (11.0, 10.0, 10.0));
        assert_eq!(seen[2], (12.0, 11.0, 10.0));
        assert_eq!(seen[3], (13.0, 12.0, 11.0));
    }

    #[test]
    fn test_unrounded_prediction_is_fed_back() {
        let model = Recording::new(0.333);
        let result = forecast(20.0, &model).unwrap();
        let seen = model.seen();

        // Raw 20.333 goes back in, not the displayed 20.33
        assert_close(seen[1].0, 20.333);
        assert_close(seen[2].0, 20.0 + 0.333 + 0.333);
        assert_close(seen[2].1, 20.333);

        // Feeding back the rounded value would give 20.66 and 20.99 here
        let values = result.values();
        assert_close(values[0], 20.33);
        assert_close(values[1], 20.67);
        assert_close(values[2], 21.0);
        assert_close(values[3], 21.33);
    }

    #[test]
    fn test_returned_values_are_rounded() {
        let result = forecast(30.0, &Weighted).unwrap();
        let expected = [29.7, 29.52, 29.34, 29.15, 28.98, 28.81, 28.64];
        for (actual, expected) in result.iter().zip(expected) {
            assert_close(actual, expected);
        }
    }

    #[test]
    fn test_non_finite_prediction_is_error() {
        let model = BlowsUpAt(4, Mutex::new(0));
        let err = forecast(25.0, &model).unwrap_err();
        match err {
            ModelError::NonFinitePrediction { step, value } => {
                assert_eq!(step, 4);
                assert!(value.is_nan());
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_non_finite_seed_is_error() {
        assert!(matches!(
            forecast(f64::INFINITY, &Identity),
            Err(ModelError::NonFiniteInput(_))
        ));
        assert!(matches!(
            forecast(f64::NAN, &Identity),
            Err(ModelError::NonFiniteInput(_))
        ));
    }

    #[test]
    fn test_works_through_trait_object() {
        let model: Box<dyn ForecastModel> = Box::new(Identity);
        let result = forecast(18.0, model.as_ref()).unwrap();
        assert_eq!(result.values(), &[18.0; 7]);
    }

    #[test]
    fn test_round_to_cents() {
        assert_eq!(round_to_cents(31.456), 31.46);
        assert_eq!(round_to_cents(31.454), 31.45);
        assert_eq!(round_to_cents(-2.346), -2.35);
        assert_eq!(round_to_cents(30.0), 30.0);
    }

    #[test]
    fn test_round_to_cents_ties_and_binary_values() {
        assert_eq!(round_to_cents(0.125), 0.12);
        assert_eq!(round_to_cents(0.375), 0.38);
        assert_eq!(round_to_cents(30.125), 30.12);
        assert_eq!(round_to_cents(-0.125), -0.12);
        assert_eq!(round_to_cents(1.115), 1.11);
        assert_eq!(round_to_cents(2.675), 2.67);
    }

    #[test]
    fn test_forecast_rounds_half_to_even() {
        struct Constant(f64);

        impl ForecastModel for Constant {
            fn predict(&self, _lag1: f64, _lag2: f64, _lag3: f64) -> f64 {
                self.0
            }
        }

        for (raw, shown) in [(0.125, 0.12), (30.125, 30.12), (1.115, 1.11)] {
            let result = forecast(25.0, &Constant(raw)).unwrap();
            assert_eq!(result.values(), &[shown; 7]);
        }
    }

    #[test]
    fn test_display_and_serialize() {
        let seq = ForecastSequence([30.0, 30.5, 31.25, 29.75, 28.0, 27.1, 26.99]);
        assert_eq!(
            seq.to_string(),
            "[30.0, 30.5, 31.25, 29.75, 28.0, 27.1, 26.99]"
        );
        let json = serde_json::to_string(&seq).unwrap();
        assert_eq!(json, "[30.0,30.5,31.25,29.75,28.0,27.1,26.99]");
    }

    #[test]
    fn test_lag_window_push() {
        let mut window = LagWindow::seeded(1.0);
        window.push(2.0);
        window.push(3.0);
        assert_eq!(window.lags(), (3.0, 2.0, 1.0));
        window.push(4.0);
        assert_eq!(window.lags(), (4.0, 3.0, 2.0));
    }
}
