//! Rep Web - pose stabilization and rep counting engine
//!
//! Entry point for WASM module. Only contains:
//! - Module declarations
//! - Console logging for the bridge
//! - wasm_bindgen entry points that delegate to submodules

use wasm_bindgen::prelude::*;

// ============================================================================
// CONSOLE LOGGING
// ============================================================================

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    pub(crate) fn log(s: &str);
}

macro_rules! console_log {
    ($($t:tt)*) => ($crate::log(&format_args!($($t)*).to_string()))
}

pub mod error;
pub mod pose;
pub mod physics;
pub mod tracking;
pub mod exercise;
pub mod engine;
mod bridge;

#[cfg(test)]
mod fixtures;

pub use error::{PoseError, Result};
pub use engine::{EngineConfig, FrameFault, OrchestratorEvent, RepCounter, SessionSummary};
pub use exercise::{ExerciseKind, FeedbackKind};
pub use pose::{FrameSample, Landmark, Pose};
pub use tracking::ContinuityState;

// Re-export wasm_bindgen functions for JS access
pub use bridge::*;

// ============================================================================
// WASM ENTRY POINTS
// ============================================================================

/// Called automatically when WASM module loads
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}
