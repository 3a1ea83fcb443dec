//! Exponential moving average - fallback smoothing strategy
//!
//! smoothed = factor * previous + (1 - factor) * current
//! A higher factor damps harder, used right after re-acquisition.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EmaParams {
    /// Factor while the subject is being re-acquired
    pub initial_smoothing_factor: f32,
    /// Factor during normal tracking
    pub smoothing_factor: f32,
}

impl Default for EmaParams {
    fn default() -> Self {
        Self {
            initial_smoothing_factor: 0.85,
            smoothing_factor: 0.7,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EmaFilter {
    value: f32,
}

impl EmaFilter {
    pub fn new(initial_value: f32) -> Self {
        Self { value: initial_value }
    }

    pub fn update(&mut self, measurement: f32, factor: f32) -> f32 {
        self.value = factor * self.value + (1.0 - factor) * measurement;
        self.value
    }

    pub fn value(&self) -> f32 {
        self.value
    }
}
