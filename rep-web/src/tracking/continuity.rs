//! Continuity state machine - subject presence across frames
//!
//! Acquiring → Stabilizing(n) → Tracking, with Lost(n) while detections are
//! missing. Short gaps hold the current phase; `max_frames_without_landmarks`
//! consecutive misses force a hard reset back to Acquiring.

use serde::Serialize;
use tracing::debug;

/// Tracking phase reported to the host every frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "frames", rename_all = "camelCase")]
pub enum ContinuityState {
    /// No subject seen since start or the last reset
    #[default]
    Acquiring,
    /// Subject just (re)appeared; count of confirming frames so far
    Stabilizing(u32),
    /// Normal operation
    Tracking,
    /// Detections missing for this many consecutive frames
    Lost(u32),
}

impl ContinuityState {
    pub fn name(&self) -> &'static str {
        match self {
            ContinuityState::Acquiring => "acquiring",
            ContinuityState::Stabilizing(_) => "stabilizing",
            ContinuityState::Tracking => "tracking",
            ContinuityState::Lost(_) => "lost",
        }
    }

    /// Whether the host should prompt the user to step back into view
    pub fn needs_reacquire(&self) -> bool {
        !matches!(self, ContinuityState::Tracking)
    }
}

/// What to do with a frame that carried a usable pose
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameDisposition {
    /// Still stabilizing: show a predicted pose, skip exercise analysis
    Predict,
    /// Trust the detection and analyze it
    Track,
}

/// Result of a frame without a usable pose
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LossOutcome {
    /// Nothing was being tracked
    Idle,
    /// Gap tolerated, phase held
    Holding(u32),
    /// Gap too long: smoother must be cleared, back to Acquiring
    HardReset,
}

pub struct ContinuityMachine {
    state: ContinuityState,
    /// Phase a `Lost` gap interrupted, resumed when the subject returns
    interrupted: ContinuityState,
    misses: u32,
    stabilization_frames: u32,
    max_frames_without_landmarks: u32,
}

impl ContinuityMachine {
    pub fn new(stabilization_frames: u32, max_frames_without_landmarks: u32) -> Self {
        Self {
            state: ContinuityState::Acquiring,
            interrupted: ContinuityState::Acquiring,
            misses: 0,
            stabilization_frames,
            max_frames_without_landmarks: max_frames_without_landmarks.max(1),
        }
    }

    pub fn state(&self) -> ContinuityState {
        self.state
    }

    /// Consecutive frames without a usable pose
    pub fn misses(&self) -> u32 {
        self.misses
    }

    /// Advance on a frame with a valid pose
    pub fn on_pose(&mut self) -> FrameDisposition {
        self.misses = 0;

        let current = match self.state {
            ContinuityState::Lost(_) => self.interrupted,
            state => state,
        };

        let (next, disposition) = match current {
            ContinuityState::Acquiring | ContinuityState::Lost(_) => {
                (ContinuityState::Stabilizing(0), FrameDisposition::Predict)
            }
            ContinuityState::Stabilizing(n) => {
                let n = n + 1;
                if n >= self.stabilization_frames {
                    (ContinuityState::Tracking, FrameDisposition::Track)
                } else {
                    (ContinuityState::Stabilizing(n), FrameDisposition::Predict)
                }
            }
            ContinuityState::Tracking => (ContinuityState::Tracking, FrameDisposition::Track),
        };

        if next.name() != self.state.name() {
            debug!(from = self.state.name(), to = next.name(), "continuity transition");
        }
        self.state = next;
        disposition
    }

    /// Advance on a frame with no usable pose
    pub fn on_miss(&mut self) -> LossOutcome {
        match self.state {
            ContinuityState::Acquiring => return LossOutcome::Idle,
            ContinuityState::Stabilizing(_) | ContinuityState::Tracking => {
                self.interrupted = self.state;
            }
            ContinuityState::Lost(_) => {}
        }

        self.misses += 1;
        if self.misses >= self.max_frames_without_landmarks {
            debug!(misses = self.misses, "landmarks lost too long, restarting acquisition");
            self.reset();
            return LossOutcome::HardReset;
        }

        self.state = ContinuityState::Lost(self.misses);
        LossOutcome::Holding(self.misses)
    }

    /// Back to Acquiring with no loss history
    pub fn reset(&mut self) {
        self.state = ContinuityState::Acquiring;
        self.interrupted = ContinuityState::Acquiring;
        self.misses = 0;
    }
}

impl Default for ContinuityMachine {
    fn default() -> Self {
        Self::new(5, 10)
    }
}
