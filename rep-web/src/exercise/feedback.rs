//! Form feedback kinds

use serde::{Deserialize, Serialize};

/// Qualitative form feedback (closed set)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FeedbackKind {
    #[default]
    None,
    KneesTooFarForward,
    BackNotStraight,
    ElbowsNotLocked,
}

impl FeedbackKind {
    /// Stable code for the host
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackKind::None => "none",
            FeedbackKind::KneesTooFarForward => "kneesTooFarForward",
            FeedbackKind::BackNotStraight => "backNotStraight",
            FeedbackKind::ElbowsNotLocked => "elbowsNotLocked",
        }
    }

    /// Instruction text shown to the user
    pub fn message(&self) -> &'static str {
        match self {
            FeedbackKind::None => "",
            FeedbackKind::KneesTooFarForward => "Keep your knees behind your toes",
            FeedbackKind::BackNotStraight => "Keep your back straight",
            FeedbackKind::ElbowsNotLocked => "Bend your elbows and lower your chest",
        }
    }
}
