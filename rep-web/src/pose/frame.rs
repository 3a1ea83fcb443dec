//! Per-frame input sample

use super::landmarks::{Landmark, Pose};

/// One detector result tagged with its capture time
///
/// `landmarks == None` means the detector reported no subject this frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameSample {
    pub landmarks: Option<Vec<Landmark>>,
    pub timestamp_ms: i64,
}

impl FrameSample {
    pub fn detected(landmarks: Vec<Landmark>, timestamp_ms: i64) -> Self {
        Self {
            landmarks: Some(landmarks),
            timestamp_ms,
        }
    }

    pub fn from_pose(pose: &Pose, timestamp_ms: i64) -> Self {
        Self::detected(pose.landmarks().to_vec(), timestamp_ms)
    }

    pub fn missing(timestamp_ms: i64) -> Self {
        Self {
            landmarks: None,
            timestamp_ms,
        }
    }
}
