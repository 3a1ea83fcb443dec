//! Engine storage and JS bridge
//!
//! Receives MediaPipe pose frames from JavaScript, runs them through the
//! rep counter and keeps the last event for the UI to read back.

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use crate::engine::{EngineConfig, OrchestratorEvent, RepCounter};
use crate::exercise::{ExerciseKind, FeedbackKind};
use crate::pose::{FrameSample, Pose};
use crate::tracking::ContinuityState;

/// Bridge-side engine state
#[derive(Default)]
struct EngineState {
    /// Applied to the next `start_session`
    config: EngineConfig,
    counter: Option<RepCounter>,
    last_event: Option<OrchestratorEvent>,
}

// Thread-local storage (WASM is single-threaded)
thread_local! {
    static ENGINE: RefCell<EngineState> = RefCell::new(EngineState::default());
}

/// JS timestamps arrive as f64 milliseconds (performance.now())
fn to_millis(timestamp_ms: f64) -> i64 {
    timestamp_ms as i64
}

fn with_last_event<T>(f: impl FnOnce(&OrchestratorEvent) -> T) -> Option<T> {
    ENGINE.with(|engine_cell| engine_cell.borrow().last_event.as_ref().map(f))
}

fn run_frame(sample: FrameSample) -> u32 {
    ENGINE.with(|engine_cell| {
        let mut engine = engine_cell.borrow_mut();
        let Some(counter) = engine.counter.as_mut() else {
            web_sys::console::warn_1(&"process_frame called before start_session".into());
            return 0;
        };

        let event = counter.process(sample);
        if event.rep_completed() {
            console_log!("🏋️ {} rep {}", counter.kind(), event.rep_count);
        }
        let delta = event.rep_count_delta;
        engine.last_event = Some(event);
        delta
    })
}

// ============================================================================
// SESSION CONTROL
// ============================================================================

/// Replace the engine configuration (JSON, camelCase, partial allowed)
///
/// Takes effect on the next `start_session`.
#[wasm_bindgen]
pub fn configure_engine(json: &str) -> Result<(), JsValue> {
    let config = EngineConfig::from_json(json)?;
    ENGINE.with(|engine_cell| engine_cell.borrow_mut().config = config);
    console_log!("⚙️ Engine configured");
    Ok(())
}

/// Start counting reps for `exercise` ("squat" or "pushUp")
#[wasm_bindgen]
pub fn start_session(exercise: &str) -> Result<(), JsValue> {
    let kind: ExerciseKind = exercise.parse()?;
    ENGINE.with(|engine_cell| -> Result<(), JsValue> {
        let mut engine = engine_cell.borrow_mut();
        engine.counter = Some(RepCounter::new(kind, engine.config)?);
        engine.last_event = None;
        Ok(())
    })?;
    console_log!("✅ {} session started", kind);
    Ok(())
}

/// Zero reps and clear all filters, keeping the exercise
#[wasm_bindgen]
pub fn reset_session() {
    ENGINE.with(|engine_cell| {
        let mut engine = engine_cell.borrow_mut();
        if let Some(counter) = engine.counter.as_mut() {
            counter.reset();
        }
        engine.last_event = None;
    });
}

// ============================================================================
// FRAME INPUT
// ============================================================================

/// Called from JavaScript with a flat Float32Array of 165 values
/// (33 landmarks × x, y, z, visibility, presence).
///
/// Returns the rep-count delta for this frame (0 or 1).
#[wasm_bindgen]
pub fn process_frame(data: &[f32], timestamp_ms: f64) -> u32 {
    let timestamp_ms = to_millis(timestamp_ms);
    let sample = match Pose::from_flat(data) {
        Ok(pose) => FrameSample::from_pose(&pose, timestamp_ms),
        Err(err) => {
            web_sys::console::warn_1(&err.to_string().into());
            // Still counts against continuity as an unusable pose
            FrameSample::detected(Vec::new(), timestamp_ms)
        }
    };
    run_frame(sample)
}

/// Called from JavaScript when the detector found no subject
#[wasm_bindgen]
pub fn report_missing_frame(timestamp_ms: f64) -> u32 {
    run_frame(FrameSample::missing(to_millis(timestamp_ms)))
}

// ============================================================================
// UI QUERIES
// ============================================================================

#[wasm_bindgen]
pub fn get_rep_count() -> u32 {
    ENGINE.with(|engine_cell| {
        engine_cell
            .borrow()
            .counter
            .as_ref()
            .map_or(0, RepCounter::rep_count)
    })
}

/// Stable feedback code, e.g. "backNotStraight"
#[wasm_bindgen]
pub fn get_feedback() -> String {
    with_last_event(|event| event.feedback)
        .unwrap_or_default()
        .as_str()
        .to_string()
}

/// Instruction text for the current feedback; the re-acquire prompt while
/// the subject is not tracked
#[wasm_bindgen]
pub fn get_feedback_message() -> String {
    match with_last_event(|event| (event.reacquire_hint(), event.feedback)) {
        Some((true, _)) => "Come closer to the camera".to_string(),
        Some((false, feedback)) => feedback.message().to_string(),
        None => FeedbackKind::None.message().to_string(),
    }
}

/// "acquiring" | "stabilizing" | "tracking" | "lost"
#[wasm_bindgen]
pub fn get_tracking_state() -> String {
    with_last_event(|event| event.tracking_state)
        .unwrap_or_default()
        .name()
        .to_string()
}

#[wasm_bindgen]
pub fn needs_reacquire() -> bool {
    with_last_event(OrchestratorEvent::reacquire_hint)
        .unwrap_or_else(|| ContinuityState::default().needs_reacquire())
}

/// Display pose in the same 165-value layout as `process_frame` input
#[wasm_bindgen]
pub fn get_display_landmarks() -> Option<Vec<f32>> {
    with_last_event(|event| event.display_pose.as_ref().map(Pose::to_flat)).flatten()
}

/// Display-pose joints confident enough to draw
#[wasm_bindgen]
pub fn get_reliable_joints() -> Vec<u32> {
    ENGINE.with(|engine_cell| {
        let engine = engine_cell.borrow();
        let threshold = engine.config.display_visibility_threshold;
        engine
            .last_event
            .as_ref()
            .map(|event| event.reliable_joints(threshold))
            .unwrap_or_default()
            .into_iter()
            .map(|index| index as u32)
            .collect()
    })
}

/// Joints the overlay should highlight for the running exercise
#[wasm_bindgen]
pub fn get_active_landmarks() -> Vec<u32> {
    ENGINE.with(|engine_cell| {
        engine_cell
            .borrow()
            .counter
            .as_ref()
            .map(|counter| counter.kind().active_landmarks().iter().map(|&i| i as u32).collect())
            .unwrap_or_default()
    })
}

/// JSON session summary for persistence
#[wasm_bindgen]
pub fn get_session_summary() -> Result<String, JsValue> {
    ENGINE.with(|engine_cell| -> Result<String, JsValue> {
        let engine = engine_cell.borrow();
        let counter = engine
            .counter
            .as_ref()
            .ok_or_else(|| JsValue::from_str("No active session"))?;
        serde_json::to_string(&counter.summary()).map_err(|err| JsValue::from_str(&err.to_string()))
    })
}

/// Current engine configuration as JSON
#[wasm_bindgen]
pub fn get_engine_config() -> Result<String, JsValue> {
    ENGINE
        .with(|engine_cell| engine_cell.borrow().config.to_json())
        .map_err(JsValue::from)
}
