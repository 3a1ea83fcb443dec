//! Bridge module - JS ↔ Rust communication
//!
//! All #[wasm_bindgen] entry points live here.
//! Re-exports only in mod.rs, logic in submodules.

mod session;

pub use session::{
    // Session control
    configure_engine,
    start_session,
    reset_session,
    // Frame input
    process_frame,
    report_missing_frame,
    // UI queries
    get_rep_count,
    get_feedback,
    get_feedback_message,
    get_tracking_state,
    needs_reacquire,
    get_display_landmarks,
    get_reliable_joints,
    get_active_landmarks,
    get_session_summary,
    get_engine_config,
};
