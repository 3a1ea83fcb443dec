//! Error types for the rep counting engine
//!
//! None of these are fatal inside the engine: the orchestrator absorbs every
//! `PoseError` into the landmark-loss path. They surface only at the codec,
//! config and bridge boundaries.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Result alias used across the engine
pub type Result<T> = std::result::Result<T, PoseError>;

/// Engine errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PoseError {
    #[error("Invalid landmark count: expected {expected}, got {actual}")]
    LandmarkCount { expected: usize, actual: usize },

    #[error("Landmark {index} has a non-finite coordinate")]
    NonFiniteCoordinate { index: usize },

    #[error("Landmark {index} out of range: ({x}, {y})")]
    CoordinateOutOfRange { index: usize, x: f32, y: f32 },

    #[error("Invalid frame data length: expected {expected}, got {actual}")]
    FrameLength { expected: usize, actual: usize },

    #[error("Unknown exercise: {0}")]
    UnknownExercise(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for PoseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<PoseError> for JsValue {
    fn from(err: PoseError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
