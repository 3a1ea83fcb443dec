//! Landmark validation - rejects structurally broken detections
//!
//! A pose is usable only if it has exactly 33 landmarks and every joint the
//! pipeline reads lies inside the normalized image (x, y in 0-1). Every
//! landmark, read or not, must have finite x, y and z since all of them are
//! smoothed and drawn.

use super::landmarks::{Landmark, Pose, REQUIRED_LANDMARKS};
use crate::error::{PoseError, Result};

/// Validate a candidate landmark list, returning it as a `Pose` unchanged
pub fn validate(candidate: impl AsRef<[Landmark]>) -> Result<Pose> {
    let pose = Pose::try_from(candidate.as_ref())?;

    if let Some(index) = pose
        .landmarks()
        .iter()
        .position(|lm| !(lm.x.is_finite() && lm.y.is_finite() && lm.z.is_finite()))
    {
        return Err(PoseError::NonFiniteCoordinate { index });
    }

    for &index in REQUIRED_LANDMARKS.iter() {
        let lm = pose[index];
        if !in_unit_range(lm.x) || !in_unit_range(lm.y) {
            return Err(PoseError::CoordinateOutOfRange {
                index,
                x: lm.x,
                y: lm.y,
            });
        }
    }

    Ok(pose)
}

fn in_unit_range(value: f32) -> bool {
    (0.0..=1.0).contains(&value)
}
