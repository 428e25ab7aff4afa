/// Claim store errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("claim store unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("failed to serialize claim {claim_id}: {reason}")]
    Serialization { claim_id: String, reason: String },
}
