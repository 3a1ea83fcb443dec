//! Squat analyzer - hip-height hysteresis
//!
//! Image y grows downward, so a descent is the hip center rising in y. The
//! hip must move more than `hip_threshold` past the running extreme of the
//! current half-cycle before the direction flips; a completed rep is a
//! descent followed by a matching ascent.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::analyzer::Analysis;
use super::feedback::FeedbackKind;
use crate::physics::bend_from_straight;
use crate::pose::{
    Pose, LEFT_HIP, LEFT_KNEE, LEFT_SHOULDER, LEG_CHAINS, RIGHT_HIP, RIGHT_KNEE, RIGHT_SHOULDER,
};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SquatParams {
    /// Hip travel (normalized y) needed to flip direction
    pub hip_threshold: f32,
    /// Shoulder-hip-knee bend (degrees) beyond which the back counts as bent
    pub max_back_angle: f32,
    /// Horizontal knee-over-ankle offset limit
    pub max_knee_offset: f32,
}

impl Default for SquatParams {
    fn default() -> Self {
        Self {
            hip_threshold: 0.05,
            max_back_angle: 30.0,
            max_knee_offset: 0.10,
        }
    }
}

const TORSO_CHAINS: [(usize, usize, usize); 2] = [
    (LEFT_SHOULDER, LEFT_HIP, LEFT_KNEE),
    (RIGHT_SHOULDER, RIGHT_HIP, RIGHT_KNEE),
];

pub struct SquatAnalyzer {
    params: SquatParams,
    is_going_down: bool,
    /// Extreme hip y of the current half-cycle (lowest y while up, highest while down)
    reference_hip_y: Option<f32>,
}

impl SquatAnalyzer {
    pub fn new(params: SquatParams) -> Self {
        Self {
            params,
            is_going_down: false,
            reference_hip_y: None,
        }
    }

    pub fn is_going_down(&self) -> bool {
        self.is_going_down
    }

    pub fn analyze(&mut self, pose: &Pose) -> Analysis {
        let hip_y = pose.hip_center().y;
        let feedback = self.evaluate_form(pose);

        let rep_completed = match self.reference_hip_y {
            // First frame only seeds history
            None => {
                self.reference_hip_y = Some(hip_y);
                false
            }
            Some(reference) => self.step(reference, hip_y),
        };

        Analysis { rep_completed, feedback }
    }

    pub fn reset(&mut self) {
        self.is_going_down = false;
        self.reference_hip_y = None;
    }

    fn step(&mut self, reference: f32, hip_y: f32) -> bool {
        let threshold = self.params.hip_threshold;

        if !self.is_going_down {
            if hip_y - reference > threshold {
                debug!(hip_y, "squat descent");
                self.is_going_down = true;
                self.reference_hip_y = Some(hip_y);
            } else {
                self.reference_hip_y = Some(reference.min(hip_y));
            }
            false
        } else if reference - hip_y > threshold {
            debug!(hip_y, "squat rep completed");
            self.is_going_down = false;
            self.reference_hip_y = Some(hip_y);
            true
        } else {
            self.reference_hip_y = Some(reference.max(hip_y));
            false
        }
    }

    /// Back takes priority over knees
    fn evaluate_form(&self, pose: &Pose) -> FeedbackKind {
        let back_bend = TORSO_CHAINS
            .iter()
            .map(|&(shoulder, hip, knee)| bend_from_straight(pose, shoulder, hip, knee))
            .fold(0.0_f32, f32::max);
        if back_bend > self.params.max_back_angle {
            return FeedbackKind::BackNotStraight;
        }

        let knee_offset = LEG_CHAINS
            .iter()
            .map(|&(_, knee, ankle)| (pose[knee].x - pose[ankle].x).abs())
            .fold(0.0_f32, f32::max);
        if knee_offset > self.params.max_knee_offset {
            return FeedbackKind::KneesTooFarForward;
        }

        FeedbackKind::None
    }
}

impl Default for SquatAnalyzer {
    fn default() -> Self {
        Self::new(SquatParams::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::standing_pose;
    use crate::pose::{Landmark, LEFT_ANKLE};

    #[test]
    fn test_single_rep_scenario() {
        let mut squat = SquatAnalyzer::default();
        let reps: Vec<bool> = [0.50, 0.50, 0.62, 0.62, 0.48]
            .iter()
            .map(|&y| squat.analyze(&standing_pose(y)).rep_completed)
            .collect();
        assert_eq!(reps, vec![false, false, false, false, true]);
    }

    #[test]
    fn test_descent_detected_at_third_sample() {
        let mut squat = SquatAnalyzer::default();
        squat.analyze(&standing_pose(0.50));
        squat.analyze(&standing_pose(0.50));
        assert!(!squat.is_going_down());
        squat.analyze(&standing_pose(0.62));
        assert!(squat.is_going_down());
    }

    #[test]
    fn test_first_frame_only_seeds() {
        let mut squat = SquatAnalyzer::default();
        // Even a huge jump right after the seed needs a prior frame
        assert!(!squat.analyze(&standing_pose(0.40)).rep_completed);
        assert!(!squat.is_going_down());
    }

    #[test]
    fn test_small_jitter_never_counts() {
        let mut squat = SquatAnalyzer::default();
        for i in 0..100 {
            let y = 0.50 + if i % 2 == 0 { 0.02 } else { -0.02 };
            assert!(!squat.analyze(&standing_pose(y)).rep_completed);
        }
    }

    #[test]
    fn test_slow_descent_accumulates() {
        let mut squat = SquatAnalyzer::default();
        let mut reps = 0;
        // 0.01 per frame down then up: never above threshold frame-to-frame
        let down = (0..=15).map(|i| 0.45 + i as f32 * 0.01);
        let up = (0..=15).rev().map(|i| 0.45 + i as f32 * 0.01);
        for y in down.chain(up) {
            if squat.analyze(&standing_pose(y)).rep_completed {
                reps += 1;
            }
        }
        assert_eq!(reps, 1);
    }

    #[test]
    fn test_no_double_count_at_bottom() {
        let mut squat = SquatAnalyzer::default();
        let mut reps = 0;
        for y in [0.50, 0.62, 0.48, 0.47, 0.49, 0.48, 0.62, 0.48] {
            if squat.analyze(&standing_pose(y)).rep_completed {
                reps += 1;
            }
        }
        assert_eq!(reps, 2);
    }

    #[test]
    fn test_reset_clears_hysteresis() {
        let mut squat = SquatAnalyzer::default();
        squat.analyze(&standing_pose(0.50));
        squat.analyze(&standing_pose(0.62));
        assert!(squat.is_going_down());
        squat.reset();
        assert!(!squat.is_going_down());
        // Seeds again instead of completing the old rep
        assert!(!squat.analyze(&standing_pose(0.48)).rep_completed);
    }

    #[test]
    fn test_good_form_has_no_feedback() {
        let mut squat = SquatAnalyzer::default();
        assert_eq!(squat.analyze(&standing_pose(0.55)).feedback, FeedbackKind::None);
    }

    #[test]
    fn test_knees_forward() {
        let mut pose = standing_pose(0.55);
        pose.landmarks_mut()[LEFT_ANKLE] = Landmark::new(0.25, 0.92, 0.0);
        let mut squat = SquatAnalyzer::default();
        assert_eq!(squat.analyze(&pose).feedback, FeedbackKind::KneesTooFarForward);
    }

    #[test]
    fn test_back_takes_priority() {
        let mut pose = standing_pose(0.55);
        // Lean the left shoulder far forward and push the knee out as well
        pose.landmarks_mut()[LEFT_SHOULDER] = Landmark::new(0.15, 0.40, 0.0);
        pose.landmarks_mut()[LEFT_ANKLE] = Landmark::new(0.25, 0.92, 0.0);
        let mut squat = SquatAnalyzer::default();
        assert_eq!(squat.analyze(&pose).feedback, FeedbackKind::BackNotStraight);
    }
}
