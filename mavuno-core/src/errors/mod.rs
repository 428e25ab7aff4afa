mod evidence_error;
mod model_error;
mod payout_error;
mod store_error;
mod workflow_error;

pub use evidence_error::EvidenceError;
pub use model_error::ModelError;
pub use payout_error::PayoutError;
pub use store_error::StoreError;
pub use workflow_error::WorkflowError;

/// Top-level error for the Mavuno pipeline.
#[derive(Debug, thiserror::Error)]
pub enum MavunoError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Evidence(#[from] EvidenceError),

    #[error(transparent)]
    Payout(#[from] PayoutError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Workflow(#[from] WorkflowError),
}

pub type MavunoResult<T> = Result<T, MavunoError>;
