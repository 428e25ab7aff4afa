use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Confidence, GeoPoint};

/// Crop condition classes produced by the on-device classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CropCondition {
    Healthy,
    DroughtStress,
    LeafBlight,
    CommonRust,
    FallArmyworm,
    Other,
}

impl CropCondition {
    /// Visually verifiable diseases where the satellite signal is not
    /// authoritative.
    pub fn is_disease(self) -> bool {
        matches!(self, Self::LeafBlight | Self::CommonRust)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::DroughtStress => "drought_stress",
            Self::LeafBlight => "leaf_blight",
            Self::CommonRust => "common_rust",
            Self::FallArmyworm => "fall_armyworm",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for CropCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One (condition, confidence) entry from the classifier's ranked output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankedCondition {
    pub condition: CropCondition,
    pub confidence: Confidence,
}

/// Farmer-submitted ground observation. Immutable once submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundObservation {
    /// Primary classification.
    pub condition: CropCondition,
    /// Confidence of the primary classification.
    pub confidence: Confidence,
    /// Ranked classifier output, at most the top three entries.
    /// Confidences need not sum to 1.
    pub ranked: Vec<RankedCondition>,
    /// Device tilt at capture time (degrees), diagnostic only.
    pub device_tilt: Option<f64>,
    /// Device azimuth at capture time (degrees), diagnostic only.
    pub device_azimuth: Option<f64>,
    /// GPS fix at capture time, when the device had one.
    pub capture_location: Option<GeoPoint>,
    pub captured_at: DateTime<Utc>,
}
