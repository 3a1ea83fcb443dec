//! Re-acquisition prediction
//!
//! While a returning subject is being confirmed, the last tracked pose is
//! carried along by the hip-center displacement of the new detection instead
//! of trusting the (often noisy) first detections outright.

use nalgebra::Vector2;

use crate::pose::Pose;

#[derive(Clone, Debug, Default)]
pub struct ReacquisitionPredictor {
    /// Last pose accepted while tracking
    last_known: Option<Pose>,
}

impl ReacquisitionPredictor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a tracked pose as the prediction anchor
    pub fn remember(&mut self, pose: &Pose) {
        self.last_known = Some(*pose);
    }

    /// Last known pose shifted by the hip displacement of `current`;
    /// `current` itself when nothing has been tracked yet
    pub fn predict(&self, current: &Pose) -> Pose {
        match &self.last_known {
            Some(last) => last.translated(current.hip_center() - last.hip_center()),
            None => *current,
        }
    }

    pub fn last_hip_center(&self) -> Option<Vector2<f32>> {
        self.last_known.as_ref().map(Pose::hip_center)
    }

    pub fn has_anchor(&self) -> bool {
        self.last_known.is_some()
    }

    pub fn clear(&mut self) {
        self.last_known = None;
    }
}
