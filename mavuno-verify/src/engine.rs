//! Rule evaluation and weighted scoring.

use chrono::{DateTime, Datelike, Utc};

use mavuno_core::config::VerificationWeights;
use mavuno_core::constants::DRY_HARVEST_MONTHS;
use mavuno_core::models::{
    AppliedRule, Confidence, CropCondition, DecisionStatus, GroundObservation, MoistureVerdict,
    SatelliteEvidence, VerificationDecision,
};

use crate::explanation;

/// Satellite confidence attributed per verdict on the weighted path.
const SEVERE_STRESS_CONFIDENCE: f64 = 0.9;
const MODERATE_STRESS_CONFIDENCE: f64 = 0.6;
const NORMAL_CONFIDENCE: f64 = 0.3;

/// Map a moisture verdict to the confidence the weighted path gives the
/// satellite signal.
pub fn satellite_confidence(verdict: MoistureVerdict) -> f64 {
    match verdict {
        MoistureVerdict::SevereStress => SEVERE_STRESS_CONFIDENCE,
        MoistureVerdict::ModerateStress => MODERATE_STRESS_CONFIDENCE,
        MoistureVerdict::Normal => NORMAL_CONFIDENCE,
    }
}

/// Outcome of a matched rule before explanation assembly.
struct RuleHit {
    status: DecisionStatus,
    score: f64,
    satellite_confidence: f64,
    rule: AppliedRule,
    summary: String,
}

/// The weighted verification engine.
///
/// Pure and deterministic: identical inputs produce identical decisions.
/// Enum inputs never cause a panic; confidence/percentage ranges are the
/// caller's construction-time contract.
#[derive(Debug, Clone, Default)]
pub struct VerificationEngine {
    weights: VerificationWeights,
}

impl VerificationEngine {
    pub fn new(weights: VerificationWeights) -> Self {
        Self { weights }
    }

    /// Adjudicate one claim.
    ///
    /// Rule order is load-bearing: contextual rules are mutually exclusive
    /// but R2 and the seasonality check both cover "drought with adequate
    /// moisture", and R2 must win.
    pub fn evaluate(
        &self,
        observation: &GroundObservation,
        evidence: &SatelliteEvidence,
        claim_date: Option<DateTime<Utc>>,
    ) -> VerificationDecision {
        tracing::debug!(
            condition = %observation.condition,
            confidence = %observation.confidence,
            ndmi = evidence.ndmi,
            verdict = %evidence.verdict(),
            "verification: evaluating"
        );

        if let Some(hit) = self.contextual_rule(observation, evidence) {
            return self.decide(hit, observation, evidence);
        }

        if let Some(date) = claim_date {
            if let Some(hit) = self.seasonality(observation, evidence, date) {
                return self.decide(hit, observation, evidence);
            }
        }

        let hit = self.weighted(observation, evidence);
        self.decide(hit, observation, evidence)
    }

    /// Contextual rules R1–R5, first match wins.
    fn contextual_rule(
        &self,
        observation: &GroundObservation,
        evidence: &SatelliteEvidence,
    ) -> Option<RuleHit> {
        let condition = observation.condition;
        let verdict = evidence.verdict();

        // R1: drought confirmed by severe moisture deficit.
        if condition == CropCondition::DroughtStress && evidence.ndmi < -0.2 {
            return Some(RuleHit {
                status: DecisionStatus::AutoApproved,
                score: 0.95,
                satellite_confidence: 0.9,
                rule: AppliedRule::DroughtSevereDeficit,
                summary: "Double confirmation: visual drought stress matches a severe \
                          satellite moisture deficit. High confidence in claim validity."
                    .to_string(),
            });
        }

        // R2: drought contradicted by a normal verdict.
        if condition == CropCondition::DroughtStress && verdict == MoistureVerdict::Normal {
            return Some(RuleHit {
                status: DecisionStatus::FlaggedForReview,
                score: 0.65,
                satellite_confidence: 0.3,
                rule: AppliedRule::DroughtNormalMoisture,
                summary: "Possible localized drought or staged capture: satellite shows \
                          normal moisture against a drought observation. Manual review \
                          required."
                    .to_string(),
            });
        }

        // R3: visually verifiable disease; satellite is not authoritative.
        if condition.is_disease() {
            return Some(RuleHit {
                status: DecisionStatus::AutoApproved,
                score: 0.85,
                satellite_confidence: 0.5,
                rule: AppliedRule::DiseaseVisual,
                summary: format!(
                    "Disease detected ({condition}). Satellite moisture may not reflect \
                     disease impact; approved on the visual assessment."
                ),
            });
        }

        // R4: healthy crop contradicted by a moisture deficit.
        if condition == CropCondition::Healthy && evidence.ndmi < -0.1 {
            return Some(RuleHit {
                status: DecisionStatus::Rejected,
                score: 0.2,
                satellite_confidence: 0.9,
                rule: AppliedRule::HealthyMoistureDeficit,
                summary: "Contradiction: the photo shows a healthy crop while satellite \
                          shows moisture stress. Possible bare-soil reading or invalid \
                          capture."
                    .to_string(),
            });
        }

        // R5: invalid subject matter.
        if condition == CropCondition::Other {
            return Some(RuleHit {
                status: DecisionStatus::Rejected,
                score: 0.0,
                satellite_confidence: 0.0,
                rule: AppliedRule::InvalidSubject,
                summary: "Invalid subject: the photo does not show a recognizable crop \
                          condition."
                    .to_string(),
            });
        }

        None
    }

    /// Dry-harvest seasonality check for drought claims.
    ///
    /// With the verdict derived from the same index, R2 intercepts every
    /// drought observation this predicate can match; the branch keeps its
    /// distinct audit label and ordering regardless.
    fn seasonality(
        &self,
        observation: &GroundObservation,
        evidence: &SatelliteEvidence,
        claim_date: DateTime<Utc>,
    ) -> Option<RuleHit> {
        if observation.condition != CropCondition::DroughtStress {
            return None;
        }
        if !DRY_HARVEST_MONTHS.contains(&claim_date.month()) {
            return None;
        }
        if evidence.ndmi < -0.1 {
            return None;
        }

        let month = claim_date.format("%B");
        Some(RuleHit {
            status: DecisionStatus::Rejected,
            score: 0.45,
            satellite_confidence: 0.3,
            rule: AppliedRule::SeasonalityDryHarvest,
            summary: format!(
                "Drought claimed during the historically dry harvest month of {month}, \
                 but satellite shows adequate moisture. Rejected for seasonality \
                 mismatch unless irrigation is documented."
            ),
        })
    }

    /// Default weighted-score path.
    fn weighted(&self, observation: &GroundObservation, evidence: &SatelliteEvidence) -> RuleHit {
        let ground = observation.confidence.value();
        let satellite = satellite_confidence(evidence.verdict());
        let score = self.weights.ground_weight * ground + self.weights.satellite_weight * satellite;

        let (status, summary) = if score > self.weights.auto_approve_threshold {
            (
                DecisionStatus::AutoApproved,
                "High confidence from both the ground observation and the satellite \
                 signal; the claim clears the auto-approval threshold."
                    .to_string(),
            )
        } else if score >= self.weights.flag_threshold {
            (
                DecisionStatus::FlaggedForReview,
                "Moderate combined confidence: the weighted score falls in the review \
                 range and needs human judgment."
                    .to_string(),
            )
        } else {
            (
                DecisionStatus::Rejected,
                "Low combined confidence: the visual and satellite assessment does not \
                 meet the minimum threshold for approval."
                    .to_string(),
            )
        };

        RuleHit {
            status,
            score,
            satellite_confidence: satellite,
            rule: AppliedRule::WeightedScore,
            summary,
        }
    }

    fn decide(
        &self,
        hit: RuleHit,
        observation: &GroundObservation,
        evidence: &SatelliteEvidence,
    ) -> VerificationDecision {
        let ground_confidence = observation.confidence;
        let satellite_confidence = Confidence::new(hit.satellite_confidence);
        let score = Confidence::new(hit.score);

        let explanation = explanation::build(&explanation::ExplanationContext {
            observation,
            evidence,
            weights: &self.weights,
            status: hit.status,
            score: score.value(),
            ground_confidence,
            satellite_confidence,
            rule: hit.rule,
            summary: &hit.summary,
        });

        tracing::debug!(
            status = %hit.status,
            score = score.value(),
            rule = %hit.rule,
            "verification: decided"
        );

        VerificationDecision {
            score,
            status: hit.status,
            explanation,
            ground_confidence,
            satellite_confidence,
            rule_applied: hit.rule,
        }
    }
}
