//! Kinematic constraints - repairs anatomically impossible joint geometry
//!
//! The detector sometimes collapses joint pairs onto each other under
//! occlusion. Shoulder and hip pairs are spread back to a minimum width
//! around their midpoint; upper arms and forearms are extended to a minimum
//! length along their detected direction. Pure function of the input pose.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::pose::{Pose, ARM_CHAINS, LEFT_HIP, LEFT_SHOULDER, RIGHT_HIP, RIGHT_SHOULDER};

/// Minimum separations in normalized image units
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnatomicalLimits {
    pub min_shoulder_distance: f32,
    pub min_hip_distance: f32,
    pub min_arm_length: f32,
}

impl Default for AnatomicalLimits {
    fn default() -> Self {
        Self {
            min_shoulder_distance: 0.15,
            min_hip_distance: 0.15,
            min_arm_length: 0.10,
        }
    }
}

/// Enforces minimum body widths and bone lengths
#[derive(Clone, Debug, Default)]
pub struct KinematicConstraints {
    limits: AnatomicalLimits,
}

impl KinematicConstraints {
    pub fn new(limits: AnatomicalLimits) -> Self {
        Self { limits }
    }

    /// Apply every constraint, returning the repaired pose
    ///
    /// Order matters: shoulders first, so the arm checks measure from the
    /// repaired shoulder, then elbow before wrist along each arm.
    pub fn apply(&self, pose: &Pose) -> Pose {
        let mut out = *pose;

        let limits = self.limits;
        Self::spread_pair(&mut out, LEFT_SHOULDER, RIGHT_SHOULDER, limits.min_shoulder_distance);
        Self::spread_pair(&mut out, LEFT_HIP, RIGHT_HIP, limits.min_hip_distance);

        for &(shoulder, elbow, wrist) in ARM_CHAINS.iter() {
            Self::extend_bone(&mut out, shoulder, elbow, limits.min_arm_length);
            Self::extend_bone(&mut out, elbow, wrist, limits.min_arm_length);
        }

        out
    }

    /// Spread a left/right pair horizontally about its midpoint so the
    /// Euclidean separation is exactly `min_distance`. Each joint keeps its
    /// own y, depth and confidence.
    fn spread_pair(pose: &mut Pose, left: usize, right: usize, min_distance: f32) {
        let l = pose[left].position();
        let r = pose[right].position();
        if (r - l).norm() >= min_distance {
            return;
        }

        // |dy| <= distance < min_distance, so the root is real
        let dy = r.y - l.y;
        let half_dx = (min_distance * min_distance - dy * dy).max(0.0).sqrt() * 0.5;
        let mid_x = (l.x + r.x) * 0.5;
        // Keep the detected left/right ordering; ties put `left` on the left
        let side = if r.x >= l.x { 1.0 } else { -1.0 };

        let landmarks = pose.landmarks_mut();
        let left_x = mid_x - side * half_dx;
        let right_x = mid_x + side * half_dx;
        landmarks[left] = landmarks[left].with_position(Vector2::new(left_x, l.y));
        landmarks[right] = landmarks[right].with_position(Vector2::new(right_x, r.y));
    }

    /// Push `distal` out to `min_length` from `proximal`, keeping direction.
    /// A zero-length bone points along +x.
    fn extend_bone(pose: &mut Pose, proximal: usize, distal: usize, min_length: f32) {
        let anchor = pose[proximal].position();
        let offset = pose[distal].position() - anchor;
        if offset.norm() >= min_length {
            return;
        }

        let direction = offset
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(Vector2::x);

        let landmarks = pose.landmarks_mut();
        landmarks[distal] = landmarks[distal].with_position(anchor + direction * min_length);
    }
}
