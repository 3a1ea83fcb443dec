//! Scalar Kalman filter for landmark coordinate smoothing
//!
//! State: one coordinate value and its variance. Constant-position model,
//! so predict only grows the variance by the process noise and every
//! detector sample is a direct measurement of the state.

use serde::{Deserialize, Serialize};

/// Noise parameters shared by every filter in a bank
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KalmanParams {
    /// How far the true position may drift between frames
    /// Higher values = more responsive, lower = smoother
    pub process_noise: f32,
    /// Detector jitter
    pub measurement_noise: f32,
    /// Variance assigned when the filter is seeded
    pub initial_uncertainty: f32,
}

impl Default for KalmanParams {
    fn default() -> Self {
        Self {
            process_noise: 0.1,
            measurement_noise: 0.5,
            initial_uncertainty: 1.0,
        }
    }
}

/// Kalman filter for a single coordinate
#[derive(Clone, Debug, PartialEq)]
pub struct KalmanFilter {
    /// Current estimate
    value: f32,
    /// Estimate variance (uncertainty)
    uncertainty: f32,
    params: KalmanParams,
}

impl KalmanFilter {
    /// Seed the filter with its first measurement
    pub fn new(initial_value: f32, params: KalmanParams) -> Self {
        Self {
            value: initial_value,
            uncertainty: params.initial_uncertainty,
            params,
        }
    }

    /// Predict + correct with one measurement, returns the new estimate
    pub fn update(&mut self, measurement: f32) -> f32 {
        // Predict: P = P + Q
        let predicted_uncertainty = self.uncertainty + self.params.process_noise;

        // Gain: K = P / (P + R)
        let gain = predicted_uncertainty / (predicted_uncertainty + self.params.measurement_noise);

        // Correct: x = x + K * (z - x), P = (1 - K) * P
        self.value += gain * (measurement - self.value);
        self.uncertainty = (1.0 - gain) * predicted_uncertainty;

        self.value
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn uncertainty(&self) -> f32 {
        self.uncertainty
    }
}
