use uuid::Uuid;

/// Orchestration errors surfaced to the invoking scheduler.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("claim {claim_id} not found")]
    ClaimNotFound { claim_id: Uuid },

    #[error("claim {claim_id} has no satellite evidence attached")]
    EvidenceNotAttached { claim_id: Uuid },
}
