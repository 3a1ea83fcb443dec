//! Push-up analyzer - elbow angle hysteresis
//!
//! Descent starts when the elbows bend below `elbow_angle_threshold`; the rep
//! completes when they extend past `extension_angle` again.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::analyzer::Analysis;
use super::feedback::FeedbackKind;
use crate::physics::{bend_from_straight, pose_angle};
use crate::pose::{
    Pose, ARM_CHAINS, LEFT_HIP, LEFT_KNEE, LEFT_SHOULDER, RIGHT_HIP, RIGHT_KNEE, RIGHT_SHOULDER,
};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PushUpParams {
    /// Elbow angle (degrees) below which the descent starts
    pub elbow_angle_threshold: f32,
    /// Elbow angle (degrees) above which the arms count as extended
    pub extension_angle: f32,
    /// Shoulder-hip-knee bend (degrees) beyond which the body sags or piques
    pub max_body_angle: f32,
}

impl Default for PushUpParams {
    fn default() -> Self {
        Self {
            elbow_angle_threshold: 90.0,
            extension_angle: 160.0,
            max_body_angle: 20.0,
        }
    }
}

const BODY_CHAINS: [(usize, usize, usize); 2] = [
    (LEFT_SHOULDER, LEFT_HIP, LEFT_KNEE),
    (RIGHT_SHOULDER, RIGHT_HIP, RIGHT_KNEE),
];

pub struct PushUpAnalyzer {
    params: PushUpParams,
    is_going_down: bool,
    previous_angle: Option<f32>,
}

impl PushUpAnalyzer {
    pub fn new(params: PushUpParams) -> Self {
        Self {
            params,
            is_going_down: false,
            previous_angle: None,
        }
    }

    pub fn is_going_down(&self) -> bool {
        self.is_going_down
    }

    /// Mean elbow angle of both arms
    pub fn elbow_angle(pose: &Pose) -> f32 {
        let total: f32 = ARM_CHAINS
            .iter()
            .map(|&(shoulder, elbow, wrist)| pose_angle(pose, shoulder, elbow, wrist))
            .sum();
        total / ARM_CHAINS.len() as f32
    }

    pub fn analyze(&mut self, pose: &Pose) -> Analysis {
        let angle = Self::elbow_angle(pose);
        let feedback = self.evaluate_form(pose, angle);

        let rep_completed = match self.previous_angle {
            // First frame only seeds history
            None => false,
            Some(_) => self.step(angle),
        };
        self.previous_angle = Some(angle);

        Analysis { rep_completed, feedback }
    }

    pub fn reset(&mut self) {
        self.is_going_down = false;
        self.previous_angle = None;
    }

    fn step(&mut self, angle: f32) -> bool {
        if !self.is_going_down && angle < self.params.elbow_angle_threshold {
            debug!(angle, "push-up descent");
            self.is_going_down = true;
            false
        } else if self.is_going_down && angle > self.params.extension_angle {
            debug!(angle, "push-up rep completed");
            self.is_going_down = false;
            true
        } else {
            false
        }
    }

    /// Body line takes priority over elbow engagement
    fn evaluate_form(&self, pose: &Pose, angle: f32) -> FeedbackKind {
        let body_bend = BODY_CHAINS
            .iter()
            .map(|&(shoulder, hip, knee)| bend_from_straight(pose, shoulder, hip, knee))
            .fold(0.0_f32, f32::max);
        if body_bend > self.params.max_body_angle {
            return FeedbackKind::BackNotStraight;
        }

        if angle > self.params.extension_angle && !self.is_going_down {
            return FeedbackKind::ElbowsNotLocked;
        }

        FeedbackKind::None
    }
}

impl Default for PushUpAnalyzer {
    fn default() -> Self {
        Self::new(PushUpParams::default())
    }
}
