//! Tracking module - subject continuity and re-acquisition
//!
//! Re-exports only. All logic in submodules.

mod continuity;
mod prediction;

pub use continuity::{ContinuityMachine, ContinuityState, FrameDisposition, LossOutcome};
pub use prediction::ReacquisitionPredictor;
