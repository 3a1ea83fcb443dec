//! Landmark and pose data structures
//!
//! Mirrors the MediaPipe Pose output: 33 landmarks in normalized image
//! coordinates (x, y in 0-1, y grows downward) plus relative depth and
//! confidence metadata.

use std::ops::Index;

use nalgebra::Vector2;

use crate::error::{PoseError, Result};

// ============================================================================
// LANDMARK INDICES (MediaPipe Pose - 33 total)
// ============================================================================

pub const LANDMARK_COUNT: usize = 33;

pub const NOSE: usize = 0;
pub const LEFT_SHOULDER: usize = 11;
pub const RIGHT_SHOULDER: usize = 12;
pub const LEFT_ELBOW: usize = 13;
pub const RIGHT_ELBOW: usize = 14;
pub const LEFT_WRIST: usize = 15;
pub const RIGHT_WRIST: usize = 16;
pub const LEFT_HIP: usize = 23;
pub const RIGHT_HIP: usize = 24;
pub const LEFT_KNEE: usize = 25;
pub const RIGHT_KNEE: usize = 26;
pub const LEFT_ANKLE: usize = 27;
pub const RIGHT_ANKLE: usize = 28;

/// Joints the pipeline reads; all must be inside the image for a pose to count
pub const REQUIRED_LANDMARKS: [usize; 12] = [
    LEFT_SHOULDER, RIGHT_SHOULDER,
    LEFT_ELBOW, RIGHT_ELBOW,
    LEFT_WRIST, RIGHT_WRIST,
    LEFT_HIP, RIGHT_HIP,
    LEFT_KNEE, RIGHT_KNEE,
    LEFT_ANKLE, RIGHT_ANKLE,
];

/// Arm chains (shoulder, elbow, wrist) for both sides
pub const ARM_CHAINS: [(usize, usize, usize); 2] = [
    (LEFT_SHOULDER, LEFT_ELBOW, LEFT_WRIST),
    (RIGHT_SHOULDER, RIGHT_ELBOW, RIGHT_WRIST),
];

/// Leg chains (hip, knee, ankle) for both sides
pub const LEG_CHAINS: [(usize, usize, usize); 2] = [
    (LEFT_HIP, LEFT_KNEE, LEFT_ANKLE),
    (RIGHT_HIP, RIGHT_KNEE, RIGHT_ANKLE),
];

/// Floats per landmark in the flat JS buffer: x, y, z, visibility, presence
pub const VALUES_PER_LANDMARK: usize = 5;

/// Flat buffer length for one pose
pub const FRAME_LENGTH: usize = LANDMARK_COUNT * VALUES_PER_LANDMARK;

// ============================================================================
// LANDMARK
// ============================================================================

/// A single tracked body joint (normalized coordinates)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,          // 0-1 normalized
    pub y: f32,          // 0-1 normalized
    pub z: f32,          // Relative depth
    pub visibility: f32, // 0-1
    pub presence: f32,   // 0-1
}

impl Landmark {
    /// Fully confident landmark at the given position
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            x,
            y,
            z,
            visibility: 1.0,
            presence: 1.0,
        }
    }

    pub fn with_confidence(self, visibility: f32, presence: f32) -> Self {
        Self {
            visibility,
            presence,
            ..self
        }
    }

    /// Image-plane position
    pub fn position(&self) -> Vector2<f32> {
        Vector2::new(self.x, self.y)
    }

    /// Same landmark moved to `position`; depth and confidence are kept
    pub fn with_position(self, position: Vector2<f32>) -> Self {
        Self {
            x: position.x,
            y: position.y,
            ..self
        }
    }

    /// Whether the overlay should draw this joint as trustworthy
    pub fn is_reliable(&self, threshold: f32) -> bool {
        self.visibility >= threshold && self.presence >= threshold
    }
}

// ============================================================================
// POSE
// ============================================================================

/// Exactly 33 landmarks for one subject at one instant
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    landmarks: [Landmark; LANDMARK_COUNT],
}

impl Pose {
    pub fn new(landmarks: [Landmark; LANDMARK_COUNT]) -> Self {
        Self { landmarks }
    }

    /// Decode the flat Float32Array sent by JavaScript
    /// (33 landmarks × x, y, z, visibility, presence)
    pub fn from_flat(data: &[f32]) -> Result<Self> {
        if data.len() != FRAME_LENGTH {
            return Err(PoseError::FrameLength {
                expected: FRAME_LENGTH,
                actual: data.len(),
            });
        }

        let mut landmarks = [Landmark::default(); LANDMARK_COUNT];
        for (landmark, chunk) in landmarks.iter_mut().zip(data.chunks_exact(VALUES_PER_LANDMARK)) {
            *landmark = Landmark {
                x: chunk[0],
                y: chunk[1],
                z: chunk[2],
                visibility: chunk[3],
                presence: chunk[4],
            };
        }
        Ok(Self { landmarks })
    }

    /// Encode in the same flat layout `from_flat` reads
    pub fn to_flat(&self) -> Vec<f32> {
        let mut data = Vec::with_capacity(FRAME_LENGTH);
        for lm in &self.landmarks {
            data.extend_from_slice(&[lm.x, lm.y, lm.z, lm.visibility, lm.presence]);
        }
        data
    }

    pub fn landmarks(&self) -> &[Landmark; LANDMARK_COUNT] {
        &self.landmarks
    }

    pub(crate) fn landmarks_mut(&mut self) -> &mut [Landmark; LANDMARK_COUNT] {
        &mut self.landmarks
    }

    /// Midpoint of the two hips
    pub fn hip_center(&self) -> Vector2<f32> {
        (self.landmarks[LEFT_HIP].position() + self.landmarks[RIGHT_HIP].position()) * 0.5
    }

    /// Every landmark shifted by `delta` in the image plane
    pub fn translated(&self, delta: Vector2<f32>) -> Self {
        let mut moved = *self;
        for lm in moved.landmarks.iter_mut() {
            *lm = lm.with_position(lm.position() + delta);
        }
        moved
    }

    /// Indices whose visibility and presence meet `threshold`
    pub fn reliable_joints(&self, threshold: f32) -> Vec<usize> {
        self.landmarks
            .iter()
            .enumerate()
            .filter(|(_, lm)| lm.is_reliable(threshold))
            .map(|(i, _)| i)
            .collect()
    }
}

impl Index<usize> for Pose {
    type Output = Landmark;

    fn index(&self, index: usize) -> &Landmark {
        &self.landmarks[index]
    }
}

impl AsRef<[Landmark]> for Pose {
    fn as_ref(&self) -> &[Landmark] {
        &self.landmarks
    }
}

impl TryFrom<&[Landmark]> for Pose {
    type Error = PoseError;

    fn try_from(landmarks: &[Landmark]) -> Result<Self> {
        let landmarks: [Landmark; LANDMARK_COUNT] =
            landmarks.try_into().map_err(|_| PoseError::LandmarkCount {
                expected: LANDMARK_COUNT,
                actual: landmarks.len(),
            })?;
        Ok(Self { landmarks })
    }
}

impl TryFrom<Vec<Landmark>> for Pose {
    type Error = PoseError;

    fn try_from(landmarks: Vec<Landmark>) -> Result<Self> {
        Self::try_from(landmarks.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_pose() -> Pose {
        let mut landmarks = [Landmark::new(0.5, 0.5, 0.0); LANDMARK_COUNT];
        landmarks[LEFT_HIP] = Landmark::new(0.4, 0.6, 0.0);
        landmarks[RIGHT_HIP] = Landmark::new(0.6, 0.7, 0.0);
        Pose::new(landmarks)
    }

    #[test]
    fn test_flat_layout() {
        let pose = sample_pose();
        let flat = pose.to_flat();
        assert_eq!(flat.len(), FRAME_LENGTH);
        assert_eq!(&flat[LEFT_HIP * 5..LEFT_HIP * 5 + 5], &[0.4, 0.6, 0.0, 1.0, 1.0]);
        assert_eq!(Pose::from_flat(&flat).unwrap(), pose);
    }

    #[test]
    fn test_flat_wrong_length() {
        let err = Pose::from_flat(&[0.0; 99]).unwrap_err();
        assert_eq!(err, PoseError::FrameLength { expected: 165, actual: 99 });
    }

    #[test]
    fn test_try_from_wrong_count() {
        let err = Pose::try_from(vec![Landmark::default(); 21]).unwrap_err();
        assert_eq!(err, PoseError::LandmarkCount { expected: 33, actual: 21 });
    }

    #[test]
    fn test_hip_center_and_translate() {
        let pose = sample_pose();
        let center = pose.hip_center();
        assert!((center.x - 0.5).abs() < 1e-6);
        assert!((center.y - 0.65).abs() < 1e-6);

        let moved = pose.translated(Vector2::new(0.1, -0.05));
        assert!((moved[LEFT_HIP].x - 0.5).abs() < 1e-6);
        assert!((moved[LEFT_HIP].y - 0.55).abs() < 1e-6);
        assert_eq!(moved[LEFT_HIP].visibility, 1.0);
    }

    #[test]
    fn test_reliable_joints() {
        let mut pose = sample_pose();
        pose.landmarks_mut()[NOSE] = Landmark::new(0.5, 0.1, 0.0).with_confidence(0.3, 0.9);
        let reliable = pose.reliable_joints(0.7);
        assert_eq!(reliable.len(), LANDMARK_COUNT - 1);
        assert!(!reliable.contains(&NOSE));
    }
}
