//! Pose module - landmark data model and input validation
//!
//! Re-exports only. All logic in submodules.

mod landmarks;
mod frame;
mod validation;

pub use landmarks::{
    Landmark,
    Pose,
    // Constants
    LANDMARK_COUNT, VALUES_PER_LANDMARK, FRAME_LENGTH,
    NOSE, LEFT_SHOULDER, RIGHT_SHOULDER,
    LEFT_ELBOW, RIGHT_ELBOW,
    LEFT_WRIST, RIGHT_WRIST,
    LEFT_HIP, RIGHT_HIP,
    LEFT_KNEE, RIGHT_KNEE,
    LEFT_ANKLE, RIGHT_ANKLE,
    REQUIRED_LANDMARKS, ARM_CHAINS, LEG_CHAINS,
};
pub use frame::FrameSample;
pub use validation::validate;
