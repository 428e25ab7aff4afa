use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::{DecisionStatus, GeoPoint, GroundObservation, SatelliteEvidence, VerificationDecision};

/// Lifecycle status of a claim.
///
/// Mirrors the decision status once adjudicated, and is independently
/// advanced to `Paid` by the payout stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStatus {
    Pending,
    AutoApproved,
    FlaggedForReview,
    Rejected,
    Paid,
}

impl ClaimStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::AutoApproved => "auto_approved",
            Self::FlaggedForReview => "flagged_for_review",
            Self::Rejected => "rejected",
            Self::Paid => "paid",
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<DecisionStatus> for ClaimStatus {
    fn from(status: DecisionStatus) -> Self {
        match status {
            DecisionStatus::AutoApproved => Self::AutoApproved,
            DecisionStatus::FlaggedForReview => Self::FlaggedForReview,
            DecisionStatus::Rejected => Self::Rejected,
        }
    }
}

/// Status of the payout sub-record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoutStatus {
    #[default]
    Unset,
    Pending,
    Completed,
    FailedNeedsManualReview,
}

impl PayoutStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unset => "unset",
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::FailedNeedsManualReview => "failed_needs_manual_review",
        }
    }
}

impl fmt::Display for PayoutStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payout sub-record on a claim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PayoutRecord {
    /// Payout amount in KES. Defaulted by the payout stage when unset.
    pub amount: Option<f64>,
    pub status: PayoutStatus,
    /// Transaction id of the successful transfer.
    pub provider_reference: Option<String>,
}

/// A crop-insurance claim as it moves through the pipeline.
///
/// Field groups (evidence, decision, payout) are updated by different
/// stages with last-writer-wins semantics; callers serialize concurrent
/// writers to the same group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    pub id: Uuid,
    /// Recipient for payout and notifications, E.164 format.
    pub farmer_phone: String,
    /// Farm location the satellite evidence is fetched for.
    pub location: GeoPoint,
    pub status: ClaimStatus,
    pub observation: GroundObservation,
    /// Absent until the evidence stage completes.
    pub evidence: Option<SatelliteEvidence>,
    /// Absent until adjudication completes. Overwritten on re-adjudication.
    pub decision: Option<VerificationDecision>,
    pub payout: PayoutRecord,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Claim {
    pub fn new(farmer_phone: String, location: GeoPoint, observation: GroundObservation) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            farmer_phone,
            location,
            status: ClaimStatus::Pending,
            observation,
            evidence: None,
            decision: None,
            payout: PayoutRecord::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach satellite evidence from the retrieval stage.
    pub fn attach_evidence(&mut self, evidence: SatelliteEvidence) {
        self.evidence = Some(evidence);
        self.touch();
    }

    /// Attach (or overwrite) the verification decision and mirror its status
    /// onto the claim lifecycle. A claim already paid stays paid.
    pub fn attach_decision(&mut self, decision: VerificationDecision) {
        if self.status != ClaimStatus::Paid {
            self.status = decision.status.into();
        }
        self.decision = Some(decision);
        self.touch();
    }

    /// Record a completed payout.
    pub fn mark_paid(&mut self, transaction_id: &str) {
        self.status = ClaimStatus::Paid;
        self.payout.status = PayoutStatus::Completed;
        self.payout.provider_reference = Some(transaction_id.to_string());
        self.touch();
    }

    /// Flag the payout for manual review after exhausted or permanent failure.
    /// The claim keeps its approved status; only the payout is parked.
    pub fn flag_payout_for_review(&mut self) {
        self.payout.status = PayoutStatus::FailedNeedsManualReview;
        self.touch();
    }

    /// Terminal claims require explicit human action to resume.
    pub fn is_terminal(&self) -> bool {
        matches!(self.status, ClaimStatus::Rejected | ClaimStatus::Paid)
            || self.payout.status == PayoutStatus::FailedNeedsManualReview
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AppliedRule, Confidence, CropCondition};

    fn observation() -> GroundObservation {
        GroundObservation {
            condition: CropCondition::DroughtStress,
            confidence: Confidence::new(0.9),
            ranked: vec![],
            device_tilt: None,
            device_azimuth: None,
            capture_location: None,
            captured_at: Utc::now(),
        }
    }

    fn decision(status: DecisionStatus) -> VerificationDecision {
        VerificationDecision {
            score: Confidence::new(0.9),
            status,
            explanation: "test".to_string(),
            ground_confidence: Confidence::new(0.9),
            satellite_confidence: Confidence::new(0.9),
            rule_applied: AppliedRule::WeightedScore,
        }
    }

    fn claim() -> Claim {
        Claim::new(
            "+254712345678".to_string(),
            GeoPoint::new(-1.29, 36.82).unwrap(),
            observation(),
        )
    }

    #[test]
    fn decision_status_mirrors_onto_lifecycle() {
        let mut c = claim();
        c.attach_decision(decision(DecisionStatus::FlaggedForReview));
        assert_eq!(c.status, ClaimStatus::FlaggedForReview);
        assert!(!c.is_terminal());

        c.attach_decision(decision(DecisionStatus::Rejected));
        assert_eq!(c.status, ClaimStatus::Rejected);
        assert!(c.is_terminal());
    }

    #[test]
    fn paid_claims_keep_paid_status_on_readjudication() {
        let mut c = claim();
        c.attach_decision(decision(DecisionStatus::AutoApproved));
        c.mark_paid("MMABC123");
        c.attach_decision(decision(DecisionStatus::Rejected));
        assert_eq!(c.status, ClaimStatus::Paid);
        assert_eq!(c.payout.status, PayoutStatus::Completed);
    }

    #[test]
    fn flagged_payout_is_terminal() {
        let mut c = claim();
        c.attach_decision(decision(DecisionStatus::AutoApproved));
        assert!(!c.is_terminal());
        c.flag_payout_for_review();
        assert!(c.is_terminal());
        assert_eq!(c.status, ClaimStatus::AutoApproved);
    }
}
