//! Engine module - the per-frame pipeline and its configuration
//!
//! Re-exports only. All logic in submodules.

mod config;
mod orchestrator;
mod session;

pub use config::EngineConfig;
pub use orchestrator::{FrameFault, OrchestratorEvent, RepCounter};
pub use session::{ExerciseSession, SessionSummary};
