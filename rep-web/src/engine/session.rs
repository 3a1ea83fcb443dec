//! Exercise session - rep count and feedback for one exercise

use serde::Serialize;
use tracing::debug;

use crate::exercise::{Analysis, ExerciseAnalyzer, ExerciseKind, FeedbackKind};
use crate::pose::Pose;

pub struct ExerciseSession {
    rep_count: u32,
    feedback: FeedbackKind,
    analyzer: ExerciseAnalyzer,
}

impl ExerciseSession {
    pub fn new(analyzer: ExerciseAnalyzer) -> Self {
        Self {
            rep_count: 0,
            feedback: FeedbackKind::None,
            analyzer,
        }
    }

    pub fn kind(&self) -> ExerciseKind {
        self.analyzer.kind()
    }

    pub fn rep_count(&self) -> u32 {
        self.rep_count
    }

    pub fn feedback(&self) -> FeedbackKind {
        self.feedback
    }

    /// Run the analyzer on a tracked pose and fold the result into the session
    pub fn record(&mut self, pose: &Pose) -> Analysis {
        let analysis = self.analyzer.analyze(pose);
        if analysis.rep_completed {
            self.rep_count += 1;
            debug!(exercise = self.kind().as_str(), reps = self.rep_count, "rep counted");
        }
        self.feedback = analysis.feedback;
        analysis
    }

    pub fn reset(&mut self) {
        self.rep_count = 0;
        self.feedback = FeedbackKind::None;
        self.analyzer.reset();
    }
}

/// End-of-session record handed to persistence
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub exercise: ExerciseKind,
    pub rep_count: u32,
    pub frames_processed: u64,
    pub frames_dropped: u64,
}
