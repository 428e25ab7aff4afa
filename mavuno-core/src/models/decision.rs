use serde::{Deserialize, Serialize};
use std::fmt;

use super::Confidence;

/// Outcome of adjudicating a claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionStatus {
    AutoApproved,
    FlaggedForReview,
    Rejected,
}

impl DecisionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AutoApproved => "auto_approved",
            Self::FlaggedForReview => "flagged_for_review",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for DecisionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed vocabulary of rules and paths the engine may report in a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppliedRule {
    /// R1: drought observation confirmed by severe moisture deficit.
    #[serde(rename = "rule_1_drought_low_moisture")]
    DroughtSevereDeficit,
    /// R2: drought observation contradicted by a normal verdict.
    #[serde(rename = "rule_2_drought_normal_moisture")]
    DroughtNormalMoisture,
    /// R3: visually verifiable disease, satellite not authoritative.
    #[serde(rename = "rule_3_disease_normal_moisture")]
    DiseaseVisual,
    /// R4: healthy observation contradicted by a moisture deficit.
    #[serde(rename = "rule_4_healthy_low_moisture")]
    HealthyMoistureDeficit,
    /// R5: photo subject is not a valid crop condition.
    #[serde(rename = "rule_5_invalid_subject")]
    InvalidSubject,
    /// Drought claimed during a dry-harvest month with adequate moisture.
    #[serde(rename = "seasonality_dry_harvest_rejection")]
    SeasonalityDryHarvest,
    /// Default weighted-score path.
    #[serde(rename = "weighted_score")]
    WeightedScore,
}

impl AppliedRule {
    pub fn label(self) -> &'static str {
        match self {
            Self::DroughtSevereDeficit => "rule_1_drought_low_moisture",
            Self::DroughtNormalMoisture => "rule_2_drought_normal_moisture",
            Self::DiseaseVisual => "rule_3_disease_normal_moisture",
            Self::HealthyMoistureDeficit => "rule_4_healthy_low_moisture",
            Self::InvalidSubject => "rule_5_invalid_subject",
            Self::SeasonalityDryHarvest => "seasonality_dry_harvest_rejection",
            Self::WeightedScore => "weighted_score",
        }
    }
}

impl fmt::Display for AppliedRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of the verification engine for one claim.
///
/// Produced exactly once per adjudication; re-adjudication overwrites the
/// previous decision rather than appending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationDecision {
    /// Combined score in [0, 1].
    pub score: Confidence,
    pub status: DecisionStatus,
    /// Mandatory human-readable explanation trail. Always names the rule or
    /// weighted path used, both input confidences, and the satellite summary.
    pub explanation: String,
    /// Confidence attributed to the ground observation.
    pub ground_confidence: Confidence,
    /// Confidence attributed to the satellite evidence.
    pub satellite_confidence: Confidence,
    pub rule_applied: AppliedRule,
}
