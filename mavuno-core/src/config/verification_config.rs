use serde::{Deserialize, Serialize};

use super::defaults;

/// Weights and thresholds for the verification engine's weighted-score path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationWeights {
    /// Weight given to the ground observation confidence.
    pub ground_weight: f64,
    /// Weight given to the satellite-derived confidence.
    pub satellite_weight: f64,
    /// Scores strictly above this auto-approve.
    pub auto_approve_threshold: f64,
    /// Scores at or above this (and not auto-approved) are flagged;
    /// below, rejected.
    pub flag_threshold: f64,
}

impl Default for VerificationWeights {
    fn default() -> Self {
        Self {
            ground_weight: defaults::DEFAULT_GROUND_WEIGHT,
            satellite_weight: defaults::DEFAULT_SATELLITE_WEIGHT,
            auto_approve_threshold: defaults::DEFAULT_AUTO_APPROVE_THRESHOLD,
            flag_threshold: defaults::DEFAULT_FLAG_THRESHOLD,
        }
    }
}
