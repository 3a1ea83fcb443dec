//! Smoother bank - one independent estimator per (joint, axis)
//!
//! Estimators live in a flat arena indexed by `joint * AXES + axis`. The bank
//! is seeded from the first pose it sees (which passes through unchanged) and
//! is re-seeded as a whole whenever the landmark count changes. Only geometry
//! is smoothed; visibility and presence are copied through. A non-finite
//! measurement leaves its estimator untouched and yields the last estimate.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ema::{EmaFilter, EmaParams};
use super::kalman::{KalmanFilter, KalmanParams};
use crate::pose::{Landmark, Pose};

/// Smoothed axes per landmark: x, y, z
pub const AXES: usize = 3;

/// Which estimator the bank runs
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SmoothingStrategy {
    Kalman(KalmanParams),
    Ema(EmaParams),
}

impl Default for SmoothingStrategy {
    fn default() -> Self {
        SmoothingStrategy::Kalman(KalmanParams::default())
    }
}

/// Why a pose is being smoothed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SmoothingMode {
    /// Normal tracking
    Steady,
    /// Predicted pose while the subject is re-acquired
    Reacquiring,
}

/// Output of one smoothing pass
#[derive(Clone, Debug, PartialEq)]
pub struct Smoothed<T> {
    pub value: T,
    /// True when this pass (re)created the bank and returned the input as-is
    pub reseeded: bool,
}

#[derive(Clone, Debug, PartialEq)]
enum Estimator {
    Kalman(KalmanFilter),
    Ema(EmaFilter),
}

impl Estimator {
    fn seed(strategy: &SmoothingStrategy, value: f32) -> Self {
        match strategy {
            SmoothingStrategy::Kalman(params) => {
                Estimator::Kalman(KalmanFilter::new(value, *params))
            }
            SmoothingStrategy::Ema(_) => Estimator::Ema(EmaFilter::new(value)),
        }
    }

    fn update(&mut self, measurement: f32, ema_factor: f32) -> f32 {
        match self {
            Estimator::Kalman(kf) => kf.update(measurement),
            Estimator::Ema(ema) => ema.update(measurement, ema_factor),
        }
    }

    fn value(&self) -> f32 {
        match self {
            Estimator::Kalman(kf) => kf.value(),
            Estimator::Ema(ema) => ema.value(),
        }
    }
}

/// Bank of per-coordinate estimators for a whole pose
pub struct SmootherBank {
    strategy: SmoothingStrategy,
    /// Flat arena, empty while unseeded
    estimators: Vec<Estimator>,
}

impl SmootherBank {
    pub fn new(strategy: SmoothingStrategy) -> Self {
        Self {
            strategy,
            estimators: Vec::new(),
        }
    }

    /// Whether a pose has been seen since the last reset
    pub fn is_seeded(&self) -> bool {
        !self.estimators.is_empty()
    }

    /// Number of joints the bank is currently sized for
    pub fn joint_count(&self) -> usize {
        self.estimators.len() / AXES
    }

    /// Drop every estimator; the next pose re-seeds the bank
    pub fn reset(&mut self) {
        self.estimators.clear();
    }

    /// Current estimate for one coordinate
    pub fn estimate(&self, joint: usize, axis: usize) -> Option<f32> {
        if axis >= AXES {
            return None;
        }
        self.estimators.get(Self::slot(joint, axis)).map(Estimator::value)
    }

    /// Smooth an arbitrary landmark list
    pub fn smooth(
        &mut self,
        landmarks: &[Landmark],
        mode: SmoothingMode,
    ) -> Smoothed<Vec<Landmark>> {
        let mut value = landmarks.to_vec();
        let reseeded = self.smooth_in_place(&mut value, mode);
        Smoothed { value, reseeded }
    }

    /// Smooth a full pose
    pub fn smooth_pose(&mut self, pose: &Pose, mode: SmoothingMode) -> Smoothed<Pose> {
        let mut value = *pose;
        let reseeded = self.smooth_in_place(value.landmarks_mut(), mode);
        Smoothed { value, reseeded }
    }

    fn smooth_in_place(&mut self, landmarks: &mut [Landmark], mode: SmoothingMode) -> bool {
        if landmarks.is_empty() {
            return false;
        }

        if self.joint_count() != landmarks.len() {
            if self.is_seeded() {
                debug!(
                    from = self.joint_count(),
                    to = landmarks.len(),
                    "landmark count changed, re-seeding smoother bank"
                );
            }
            self.seed(landmarks);
            return true;
        }

        let factor = self.ema_factor(mode);
        let strategy = self.strategy;
        for (joint, lm) in landmarks.iter_mut().enumerate() {
            for axis in 0..AXES {
                let coordinate = Self::axis_mut(lm, axis);
                let estimator = &mut self.estimators[Self::slot(joint, axis)];
                *coordinate = if !coordinate.is_finite() {
                    estimator.value()
                } else if !estimator.value().is_finite() {
                    // Seeded from a bad sample; restart this coordinate only
                    *estimator = Estimator::seed(&strategy, *coordinate);
                    *coordinate
                } else {
                    estimator.update(*coordinate, factor)
                };
            }
        }
        false
    }

    fn seed(&mut self, landmarks: &[Landmark]) {
        self.estimators = landmarks
            .iter()
            .flat_map(|lm| [lm.x, lm.y, lm.z])
            .map(|value| Estimator::seed(&self.strategy, value))
            .collect();
    }

    fn ema_factor(&self, mode: SmoothingMode) -> f32 {
        match (self.strategy, mode) {
            (SmoothingStrategy::Ema(params), SmoothingMode::Reacquiring) => {
                params.initial_smoothing_factor
            }
            (SmoothingStrategy::Ema(params), SmoothingMode::Steady) => params.smoothing_factor,
            (SmoothingStrategy::Kalman(_), _) => 0.0,
        }
    }

    fn slot(joint: usize, axis: usize) -> usize {
        joint * AXES + axis
    }

    fn axis_mut(lm: &mut Landmark, axis: usize) -> &mut f32 {
        match axis {
            0 => &mut lm.x,
            1 => &mut lm.y,
            _ => &mut lm.z,
        }
    }
}

impl Default for SmootherBank {
    fn default() -> Self {
        Self::new(SmoothingStrategy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::LANDMARK_COUNT;
    use proptest::prelude::*;

    fn uniform_pose(x: f32, y: f32, z: f32) -> Pose {
        Pose::new([Landmark::new(x, y, z).with_confidence(0.9, 0.8); LANDMARK_COUNT])
    }

    #[test]
    fn test_first_pose_passes_through() {
        let mut bank = SmootherBank::default();
        let pose = uniform_pose(0.3, 0.6, -0.1);
        let out = bank.smooth_pose(&pose, SmoothingMode::Steady);
        assert!(out.reseeded);
        assert_eq!(out.value, pose);
        assert!(bank.is_seeded());
        assert_eq!(bank.joint_count(), LANDMARK_COUNT);
    }

    #[test]
    fn test_second_pose_is_smoothed() {
        let mut bank = SmootherBank::default();
        bank.smooth_pose(&uniform_pose(0.3, 0.3, 0.0), SmoothingMode::Steady);
        let out = bank.smooth_pose(&uniform_pose(0.5, 0.5, 0.0), SmoothingMode::Steady);
        assert!(!out.reseeded);
        let x = out.value[0].x;
        assert!(x > 0.3 && x < 0.5);
    }

    #[test]
    fn test_confidence_copied_through() {
        let mut bank = SmootherBank::default();
        bank.smooth_pose(&uniform_pose(0.3, 0.3, 0.0), SmoothingMode::Steady);
        let mut next = uniform_pose(0.4, 0.4, 0.0);
        next.landmarks_mut()[5] = next[5].with_confidence(0.1, 0.2);
        let out = bank.smooth_pose(&next, SmoothingMode::Steady);
        assert_eq!(out.value[5].visibility, 0.1);
        assert_eq!(out.value[5].presence, 0.2);
    }

    #[test]
    fn test_count_mismatch_reseeds() {
        let mut bank = SmootherBank::default();
        let full = vec![Landmark::new(0.2, 0.2, 0.0); LANDMARK_COUNT];
        bank.smooth(&full, SmoothingMode::Steady);
        bank.smooth(&full, SmoothingMode::Steady);

        let partial = vec![Landmark::new(0.9, 0.9, 0.0); 10];
        let out = bank.smooth(&partial, SmoothingMode::Steady);
        assert!(out.reseeded);
        assert_eq!(out.value, partial);
        assert_eq!(bank.joint_count(), 10);
    }

    #[test]
    fn test_reset_clears_whole_bank() {
        let mut bank = SmootherBank::default();
        bank.smooth_pose(&uniform_pose(0.3, 0.3, 0.0), SmoothingMode::Steady);
        bank.reset();
        assert!(!bank.is_seeded());
        assert_eq!(bank.estimate(0, 0), None);

        let pose = uniform_pose(0.7, 0.1, 0.2);
        let out = bank.smooth_pose(&pose, SmoothingMode::Steady);
        assert!(out.reseeded);
        assert_eq!(out.value, pose);
    }

    #[test]
    fn test_ema_modes() {
        let params = EmaParams::default();
        let mut steady = SmootherBank::new(SmoothingStrategy::Ema(params));
        let mut reacquiring = SmootherBank::new(SmoothingStrategy::Ema(params));
        let start = uniform_pose(0.0, 0.0, 0.0);
        let target = uniform_pose(1.0, 1.0, 1.0);

        steady.smooth_pose(&start, SmoothingMode::Steady);
        reacquiring.smooth_pose(&start, SmoothingMode::Steady);
        let s = steady.smooth_pose(&target, SmoothingMode::Steady).value[0].x;
        let r = reacquiring.smooth_pose(&target, SmoothingMode::Reacquiring).value[0].x;

        assert!((s - (1.0 - params.smoothing_factor)).abs() < 1e-6);
        assert!((r - (1.0 - params.initial_smoothing_factor)).abs() < 1e-6);
    }

    #[test]
    fn test_non_finite_measurement_keeps_estimate() {
        let mut bank = SmootherBank::default();
        bank.smooth_pose(&uniform_pose(0.4, 0.4, 0.0), SmoothingMode::Steady);

        let mut bad = uniform_pose(0.4, 0.4, 0.0);
        bad.landmarks_mut()[0].x = f32::NAN;
        bad.landmarks_mut()[23].z = f32::INFINITY;
        let out = bank.smooth_pose(&bad, SmoothingMode::Steady).value;
        assert!((out[0].x - 0.4).abs() < 1e-6);
        assert!(out[23].z.abs() < 1e-6);

        let out = bank.smooth_pose(&uniform_pose(0.4, 0.4, 0.0), SmoothingMode::Steady).value;
        assert!(out.landmarks().iter().all(|lm| lm.x.is_finite() && lm.z.is_finite()));
    }

    #[test]
    fn test_non_finite_seed_recovers() {
        let mut bank = SmootherBank::default();
        let mut bad = uniform_pose(0.3, 0.3, 0.0);
        bad.landmarks_mut()[5].y = f32::NAN;
        bank.smooth_pose(&bad, SmoothingMode::Steady);

        let out = bank.smooth_pose(&uniform_pose(0.3, 0.3, 0.0), SmoothingMode::Steady).value;
        assert_eq!(out[5].y, 0.3);
        assert_eq!(bank.estimate(5, 1), Some(0.3));
    }

    #[test]
    fn test_estimate_lookup() {
        let mut bank = SmootherBank::default();
        bank.smooth_pose(&uniform_pose(0.3, 0.6, -0.1), SmoothingMode::Steady);
        assert_eq!(bank.estimate(4, 1), Some(0.6));
        assert_eq!(bank.estimate(4, 3), None);
        assert_eq!(bank.estimate(LANDMARK_COUNT, 0), None);
    }

    proptest! {
        #[test]
        fn constant_pose_converges(start in 0.0f32..=1.0, target in 0.0f32..=1.0) {
            let mut bank = SmootherBank::default();
            bank.smooth_pose(&uniform_pose(start, start, start), SmoothingMode::Steady);
            let target_pose = uniform_pose(target, target, target);
            let mut out = target_pose;
            for _ in 0..200 {
                out = bank.smooth_pose(&target_pose, SmoothingMode::Steady).value;
            }
            for lm in out.landmarks() {
                prop_assert!((lm.x - target).abs() < 1e-3);
                prop_assert!((lm.y - target).abs() < 1e-3);
                prop_assert!((lm.z - target).abs() < 1e-3);
            }
        }
    }
}
