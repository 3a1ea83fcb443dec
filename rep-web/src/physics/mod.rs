//! Physics module - smoothing filters, anatomical constraints, joint geometry
//!
//! Re-exports only. All logic in submodules.

mod kalman;
mod ema;
mod smoother;
mod kinematic_constraints;
mod angles;

pub use kalman::{KalmanFilter, KalmanParams};
pub use ema::{EmaFilter, EmaParams};
pub use smoother::{SmootherBank, SmoothingStrategy, SmoothingMode, Smoothed, AXES};
pub use kinematic_constraints::{KinematicConstraints, AnatomicalLimits};
pub use angles::{joint_angle, pose_angle, bend_from_straight};
