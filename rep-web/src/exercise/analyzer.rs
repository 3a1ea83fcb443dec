//! Exercise analyzer dispatch

use super::feedback::FeedbackKind;
use super::kind::ExerciseKind;
use super::push_up::{PushUpAnalyzer, PushUpParams};
use super::squat::{SquatAnalyzer, SquatParams};
use crate::pose::Pose;

/// Per-frame analyzer output
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Analysis {
    pub rep_completed: bool,
    pub feedback: FeedbackKind,
}

/// The analyzer for the active exercise
pub enum ExerciseAnalyzer {
    Squat(SquatAnalyzer),
    PushUp(PushUpAnalyzer),
}

impl ExerciseAnalyzer {
    pub fn new(kind: ExerciseKind, squat: SquatParams, push_up: PushUpParams) -> Self {
        match kind {
            ExerciseKind::Squat => ExerciseAnalyzer::Squat(SquatAnalyzer::new(squat)),
            ExerciseKind::PushUp => ExerciseAnalyzer::PushUp(PushUpAnalyzer::new(push_up)),
        }
    }

    pub fn kind(&self) -> ExerciseKind {
        match self {
            ExerciseAnalyzer::Squat(_) => ExerciseKind::Squat,
            ExerciseAnalyzer::PushUp(_) => ExerciseKind::PushUp,
        }
    }

    pub fn analyze(&mut self, pose: &Pose) -> Analysis {
        match self {
            ExerciseAnalyzer::Squat(squat) => squat.analyze(pose),
            ExerciseAnalyzer::PushUp(push_up) => push_up.analyze(pose),
        }
    }

    pub fn reset(&mut self) {
        match self {
            ExerciseAnalyzer::Squat(squat) => squat.reset(),
            ExerciseAnalyzer::PushUp(push_up) => push_up.reset(),
        }
    }
}
