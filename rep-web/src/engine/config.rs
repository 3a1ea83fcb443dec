//! Engine configuration
//!
//! Every tunable constant in one serde document. Missing keys fall back to
//! the defaults, so hosts only send what they override.

use serde::{Deserialize, Serialize};

use crate::error::{PoseError, Result};
use crate::exercise::{PushUpParams, SquatParams};
use crate::physics::{AnatomicalLimits, SmoothingStrategy};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Valid poses needed after (re)acquisition before analysis starts
    pub stabilization_frames: u32,
    /// Consecutive misses tolerated before a hard reset
    pub max_frames_without_landmarks: u32,
    pub constraints: AnatomicalLimits,
    pub smoothing: SmoothingStrategy,
    pub squat: SquatParams,
    pub push_up: PushUpParams,
    /// Minimum visibility/presence for a joint to be drawn as reliable
    pub display_visibility_threshold: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            stabilization_frames: 5,
            max_frames_without_landmarks: 10,
            constraints: AnatomicalLimits::default(),
            smoothing: SmoothingStrategy::default(),
            squat: SquatParams::default(),
            push_up: PushUpParams::default(),
            display_visibility_threshold: 0.7,
        }
    }
}

impl EngineConfig {
    /// Parse a (possibly partial) JSON document and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_frames_without_landmarks == 0 {
            return Err(PoseError::Config("maxFramesWithoutLandmarks must be at least 1".into()));
        }

        let mut checks = vec![
            ("constraints.minShoulderDistance", self.constraints.min_shoulder_distance),
            ("constraints.minHipDistance", self.constraints.min_hip_distance),
            ("constraints.minArmLength", self.constraints.min_arm_length),
            ("squat.hipThreshold", self.squat.hip_threshold),
            ("squat.maxBackAngle", self.squat.max_back_angle),
            ("squat.maxKneeOffset", self.squat.max_knee_offset),
            ("pushUp.elbowAngleThreshold", self.push_up.elbow_angle_threshold),
            ("pushUp.extensionAngle", self.push_up.extension_angle),
            ("pushUp.maxBodyAngle", self.push_up.max_body_angle),
            ("displayVisibilityThreshold", self.display_visibility_threshold),
        ];
        match self.smoothing {
            SmoothingStrategy::Kalman(params) => checks.extend([
                ("smoothing.processNoise", params.process_noise),
                ("smoothing.measurementNoise", params.measurement_noise),
                ("smoothing.initialUncertainty", params.initial_uncertainty),
            ]),
            SmoothingStrategy::Ema(params) => {
                for (name, factor) in [
                    ("smoothing.initialSmoothingFactor", params.initial_smoothing_factor),
                    ("smoothing.smoothingFactor", params.smoothing_factor),
                ] {
                    if !(0.0..1.0).contains(&factor) {
                        return Err(PoseError::Config(format!(
                            "{name} must be in [0, 1), got {factor}"
                        )));
                    }
                }
            }
        }

        for (name, value) in checks {
            if !value.is_finite() || value <= 0.0 {
                return Err(PoseError::Config(format!("{name} must be positive, got {value}")));
            }
        }

        if self.push_up.extension_angle <= self.push_up.elbow_angle_threshold {
            return Err(PoseError::Config(
                "pushUp.extensionAngle must exceed pushUp.elbowAngleThreshold".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::EmaParams;

    #[test]
    fn test_defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.stabilization_frames, 5);
        assert_eq!(config.max_frames_without_landmarks, 10);
    }

    #[test]
    fn test_partial_json() {
        let json = r#"{"stabilizationFrames": 3, "squat": {"hipThreshold": 0.08}}"#;
        let config = EngineConfig::from_json(json).unwrap();
        assert_eq!(config.stabilization_frames, 3);
        assert_eq!(config.squat.hip_threshold, 0.08);
        assert_eq!(config.squat.max_back_angle, 30.0);
        assert_eq!(config.push_up, PushUpParams::default());
    }

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(EngineConfig::from_json("{}").unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_ema_strategy() {
        let json = r#"{"smoothing": {"kind": "ema", "smoothingFactor": 0.5}}"#;
        let config = EngineConfig::from_json(json).unwrap();
        match config.smoothing {
            SmoothingStrategy::Ema(params) => {
                assert_eq!(params.smoothing_factor, 0.5);
                assert_eq!(
                    params.initial_smoothing_factor,
                    EmaParams::default().initial_smoothing_factor
                );
            }
            other => panic!("expected ema, got {other:?}"),
        }
    }

    #[test]
    fn test_json_roundtrip() {
        let config = EngineConfig::default();
        let json = config.to_json().unwrap();
        assert!(json.contains("\"maxFramesWithoutLandmarks\":10"));
        assert_eq!(EngineConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            EngineConfig::from_json(r#"{"maxFramesWithoutLandmarks": 0}"#),
            Err(PoseError::Config(_))
        ));
        assert!(matches!(
            EngineConfig::from_json(r#"{"constraints": {"minArmLength": -0.1}}"#),
            Err(PoseError::Config(_))
        ));
        assert!(matches!(
            EngineConfig::from_json(r#"{"pushUp": {"extensionAngle": 80}}"#),
            Err(PoseError::Config(_))
        ));
        assert!(matches!(
            EngineConfig::from_json(r#"{"smoothing": {"kind": "ema", "smoothingFactor": 1.5}}"#),
            Err(PoseError::Config(_))
        ));
        assert!(matches!(EngineConfig::from_json("not json"), Err(PoseError::Config(_))));
    }
}
