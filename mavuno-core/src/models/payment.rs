use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Outcome of a single payout attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptOutcome {
    Completed,
    Failed,
}

impl fmt::Display for AttemptOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Completed => "completed",
            Self::Failed => "failed",
        })
    }
}

/// Append-only audit record of one payout attempt.
///
/// Never mutated or deleted; used to reconstruct what was tried and why it
/// failed, and for idempotency inspection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentAttempt {
    pub transaction_id: String,
    pub claim_id: Uuid,
    pub phone_number: String,
    /// Amount in KES.
    pub amount: f64,
    pub outcome: AttemptOutcome,
    pub message: String,
    pub created_at: DateTime<Utc>,
}
