//! Exercise module - rep counting and form feedback per exercise
//!
//! Re-exports only. All logic in submodules.

mod analyzer;
mod feedback;
mod kind;
mod push_up;
mod squat;

pub use analyzer::{Analysis, ExerciseAnalyzer};
pub use feedback::FeedbackKind;
pub use kind::ExerciseKind;
pub use push_up::{PushUpAnalyzer, PushUpParams};
pub use squat::{SquatAnalyzer, SquatParams};
