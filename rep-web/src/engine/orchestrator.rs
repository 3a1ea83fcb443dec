//! Rep counting orchestrator
//!
//! Runs validate → correct → continuity → smooth → analyze for every frame
//! and owns all engine state. `process` never fails: anything unusable is
//! folded into the landmark-loss path and reported on the event.

use serde::Serialize;
use tracing::{debug, warn};

use super::config::EngineConfig;
use super::session::{ExerciseSession, SessionSummary};
use crate::error::Result;
use crate::exercise::{ExerciseAnalyzer, ExerciseKind, FeedbackKind};
use crate::physics::{KinematicConstraints, SmootherBank, SmoothingMode};
use crate::pose::{validate, FrameSample, Pose};
use crate::tracking::{
    ContinuityMachine, ContinuityState, FrameDisposition, LossOutcome, ReacquisitionPredictor,
};

/// Why a frame carried no usable pose
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FrameFault {
    /// Landmarks present but malformed or out of range
    InvalidPose,
    /// Detector reported no subject
    DetectionMiss,
}

/// Everything the host needs after one frame
#[derive(Clone, Debug, PartialEq)]
pub struct OrchestratorEvent {
    /// 0 or 1
    pub rep_count_delta: u32,
    pub rep_count: u32,
    pub feedback: FeedbackKind,
    pub tracking_state: ContinuityState,
    /// Smoothed (or predicted) pose for the overlay; `None` without a usable pose
    pub display_pose: Option<Pose>,
    /// Timestamp after monotonic clamping
    pub timestamp_ms: i64,
    pub fault: Option<FrameFault>,
    /// The smoother bank was (re)seeded on this frame
    pub reseeded: bool,
}

impl OrchestratorEvent {
    pub fn rep_completed(&self) -> bool {
        self.rep_count_delta > 0
    }

    /// Prompt the user to come closer / step back into view
    pub fn reacquire_hint(&self) -> bool {
        self.tracking_state.needs_reacquire()
    }

    /// Display-pose joints confident enough to draw
    pub fn reliable_joints(&self, threshold: f32) -> Vec<usize> {
        self.display_pose
            .as_ref()
            .map(|pose| pose.reliable_joints(threshold))
            .unwrap_or_default()
    }
}

pub struct RepCounter {
    config: EngineConfig,
    constraints: KinematicConstraints,
    continuity: ContinuityMachine,
    predictor: ReacquisitionPredictor,
    smoother: SmootherBank,
    session: ExerciseSession,
    last_timestamp: Option<i64>,
    frames_processed: u64,
    frames_dropped: u64,
}

impl RepCounter {
    pub fn new(kind: ExerciseKind, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        debug!(exercise = kind.as_str(), "rep counter created");

        Ok(Self {
            constraints: KinematicConstraints::new(config.constraints),
            continuity: ContinuityMachine::new(
                config.stabilization_frames,
                config.max_frames_without_landmarks,
            ),
            predictor: ReacquisitionPredictor::new(),
            smoother: SmootherBank::new(config.smoothing),
            session: ExerciseSession::new(ExerciseAnalyzer::new(
                kind,
                config.squat,
                config.push_up,
            )),
            last_timestamp: None,
            frames_processed: 0,
            frames_dropped: 0,
            config,
        })
    }

    // ========================================================================
    // FRAME PIPELINE
    // ========================================================================

    pub fn process(&mut self, sample: FrameSample) -> OrchestratorEvent {
        let timestamp_ms = self.advance_clock(sample.timestamp_ms);
        self.frames_processed += 1;

        let Some(landmarks) = sample.landmarks else {
            return self.on_missing(timestamp_ms, FrameFault::DetectionMiss);
        };

        match validate(&landmarks) {
            Ok(pose) => self.on_pose(&pose, timestamp_ms),
            Err(err) => {
                warn!(%err, timestamp_ms, "rejected pose");
                self.on_missing(timestamp_ms, FrameFault::InvalidPose)
            }
        }
    }

    fn on_pose(&mut self, pose: &Pose, timestamp_ms: i64) -> OrchestratorEvent {
        let corrected = self.constraints.apply(pose);

        let (display, reseeded, rep_completed) = match self.continuity.on_pose() {
            FrameDisposition::Predict => {
                let predicted = self.predictor.predict(&corrected);
                let smoothed = self.smoother.smooth_pose(&predicted, SmoothingMode::Reacquiring);
                (smoothed.value, smoothed.reseeded, false)
            }
            FrameDisposition::Track => {
                let smoothed = self.smoother.smooth_pose(&corrected, SmoothingMode::Steady);
                self.predictor.remember(&smoothed.value);
                let analysis = self.session.record(&smoothed.value);
                (smoothed.value, smoothed.reseeded, analysis.rep_completed)
            }
        };

        OrchestratorEvent {
            rep_count_delta: u32::from(rep_completed),
            rep_count: self.session.rep_count(),
            feedback: self.session.feedback(),
            tracking_state: self.continuity.state(),
            display_pose: Some(display),
            timestamp_ms,
            fault: None,
            reseeded,
        }
    }

    fn on_missing(&mut self, timestamp_ms: i64, fault: FrameFault) -> OrchestratorEvent {
        self.frames_dropped += 1;

        if self.continuity.on_miss() == LossOutcome::HardReset {
            // Rep count and the prediction anchor survive a hard reset
            self.smoother.reset();
        }

        OrchestratorEvent {
            rep_count_delta: 0,
            rep_count: self.session.rep_count(),
            feedback: self.session.feedback(),
            tracking_state: self.continuity.state(),
            display_pose: None,
            timestamp_ms,
            fault: Some(fault),
            reseeded: false,
        }
    }

    /// Force strictly increasing timestamps
    fn advance_clock(&mut self, timestamp_ms: i64) -> i64 {
        let timestamp_ms = match self.last_timestamp {
            Some(last) if timestamp_ms <= last => last.saturating_add(1),
            _ => timestamp_ms,
        };
        self.last_timestamp = Some(timestamp_ms);
        timestamp_ms
    }

    /// Start the exercise over: zero reps, clear feedback and all filters
    pub fn reset(&mut self) {
        debug!(exercise = self.kind().as_str(), "session reset");
        self.session.reset();
        self.smoother.reset();
        self.continuity.reset();
        self.predictor.clear();
        self.frames_processed = 0;
        self.frames_dropped = 0;
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn kind(&self) -> ExerciseKind {
        self.session.kind()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn rep_count(&self) -> u32 {
        self.session.rep_count()
    }

    pub fn feedback(&self) -> FeedbackKind {
        self.session.feedback()
    }

    pub fn tracking_state(&self) -> ContinuityState {
        self.continuity.state()
    }

    pub fn smoother(&self) -> &SmootherBank {
        &self.smoother
    }

    pub fn last_timestamp(&self) -> Option<i64> {
        self.last_timestamp
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            exercise: self.kind(),
            rep_count: self.session.rep_count(),
            frames_processed: self.frames_processed,
            frames_dropped: self.frames_dropped,
        }
    }
}
