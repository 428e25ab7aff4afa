use uuid::Uuid;

use crate::errors::MavunoResult;
use crate::models::{Claim, PaymentAttempt};

/// Persistence seam for claims and the payment attempt log.
///
/// Claims are saved whole with last-writer-wins semantics per field group;
/// the payment log is append-only and safe for concurrent writers.
pub trait ClaimStore: Send + Sync {
    fn load(&self, claim_id: Uuid) -> MavunoResult<Option<Claim>>;
    fn save(&self, claim: &Claim) -> MavunoResult<()>;

    /// Append one payout attempt to the audit log. Entries are never
    /// mutated or deleted.
    fn append_payment_log(&self, entry: &PaymentAttempt) -> MavunoResult<()>;

    /// All logged attempts for a claim, oldest first. Audit and idempotency
    /// inspection only.
    fn payment_log(&self, claim_id: Uuid) -> MavunoResult<Vec<PaymentAttempt>>;
}
