//! Joint angle calculation using dot product
//!
//! Angle at B for the chain A-B-C: cos(θ) = (BA · BC) / (|BA| × |BC|)

use nalgebra::Vector2;

use crate::pose::Pose;

/// Angle at `b` in degrees, 0° when either segment has zero length
pub fn joint_angle(a: Vector2<f32>, b: Vector2<f32>, c: Vector2<f32>) -> f32 {
    let v1 = a - b;
    let v2 = c - b;

    let mag1 = v1.norm();
    let mag2 = v2.norm();
    if mag1 <= f32::EPSILON || mag2 <= f32::EPSILON {
        return 0.0;
    }

    let cos_angle = (v1.dot(&v2) / (mag1 * mag2)).clamp(-1.0, 1.0);
    cos_angle.acos().to_degrees()
}

/// Angle at landmark `b` of `pose`
pub fn pose_angle(pose: &Pose, a: usize, b: usize, c: usize) -> f32 {
    joint_angle(pose[a].position(), pose[b].position(), pose[c].position())
}

/// How far the chain A-B-C bends away from a straight line, in degrees
pub fn bend_from_straight(pose: &Pose, a: usize, b: usize, c: usize) -> f32 {
    180.0 - pose_angle(pose, a, b, c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_straight_arm() {
        let angle = joint_angle(
            Vector2::new(0.0, 0.0),
            Vector2::new(0.5, 0.0),
            Vector2::new(1.0, 0.0),
        );
        assert!((angle - 180.0).abs() < 1e-3);
    }

    #[test]
    fn test_bent_arm() {
        let angle = joint_angle(
            Vector2::new(0.0, 0.0),
            Vector2::new(0.5, 0.0),
            Vector2::new(0.5, 0.5),
        );
        assert!((angle - 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_degenerate_is_zero() {
        let p = Vector2::new(0.3, 0.3);
        assert_eq!(joint_angle(p, p, Vector2::new(0.9, 0.1)), 0.0);
    }
}
