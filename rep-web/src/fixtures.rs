//! Synthetic poses shared by the unit tests

use nalgebra::Vector2;

use crate::pose::*;

fn set(lm: &mut [Landmark; LANDMARK_COUNT], index: usize, x: f32, y: f32) {
    lm[index] = Landmark::new(x, y, 0.0);
}

/// Upright subject facing the camera with both hips at `hip_y`
///
/// Shoulder, hip and knee share an x on each side, so the torso-thigh line
/// is straight and knees sit over ankles.
pub fn standing_pose(hip_y: f32) -> Pose {
    let mut lm = [Landmark::new(0.5, 0.5, 0.0); LANDMARK_COUNT];
    for (x, sign) in [(0.40, -1.0), (0.60, 1.0)] {
        let (shoulder, elbow, wrist, hip, knee, ankle) = if sign < 0.0 {
            (LEFT_SHOULDER, LEFT_ELBOW, LEFT_WRIST, LEFT_HIP, LEFT_KNEE, LEFT_ANKLE)
        } else {
            (RIGHT_SHOULDER, RIGHT_ELBOW, RIGHT_WRIST, RIGHT_HIP, RIGHT_KNEE, RIGHT_ANKLE)
        };
        set(&mut lm, shoulder, x, 0.30);
        set(&mut lm, elbow, x + sign * 0.02, 0.45);
        set(&mut lm, wrist, x + sign * 0.03, 0.58);
        set(&mut lm, hip, x, hip_y);
        set(&mut lm, knee, x, 0.75);
        set(&mut lm, ankle, x, 0.92);
    }
    Pose::new(lm)
}

/// Side-on plank with both elbows bent to `elbow_angle` degrees
///
/// Shoulder-hip-knee is a straight line on each side; the right side is the
/// left side shifted 0.16 along x so the body widths stay plausible.
pub fn push_up_pose(elbow_angle: f32) -> Pose {
    let mut lm = [Landmark::new(0.5, 0.5, 0.0); LANDMARK_COUNT];
    let theta = elbow_angle.to_radians();
    let forearm = Vector2::new(theta.sin(), -theta.cos()) * 0.12;

    for (dx, chain) in [
        (0.0, (LEFT_SHOULDER, LEFT_ELBOW, LEFT_WRIST, LEFT_HIP, LEFT_KNEE, LEFT_ANKLE)),
        (0.16, (RIGHT_SHOULDER, RIGHT_ELBOW, RIGHT_WRIST, RIGHT_HIP, RIGHT_KNEE, RIGHT_ANKLE)),
    ] {
        let (shoulder, elbow, wrist, hip, knee, ankle) = chain;
        set(&mut lm, shoulder, 0.15 + dx, 0.40);
        set(&mut lm, elbow, 0.15 + dx, 0.52);
        set(&mut lm, wrist, 0.15 + dx + forearm.x, 0.52 + forearm.y);
        set(&mut lm, hip, 0.40 + dx, 0.42);
        set(&mut lm, knee, 0.60 + dx, 0.436);
        set(&mut lm, ankle, 0.75 + dx, 0.448);
    }
    Pose::new(lm)
}
