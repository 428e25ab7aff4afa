use serde::{Deserialize, Serialize};

use crate::errors::PayoutError;

/// One transfer instruction handed to the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRequest {
    /// Recipient in E.164 format.
    pub phone_number: String,
    /// Amount in KES.
    pub amount: f64,
    /// Claim reference for reconciliation; idempotency is the caller's job.
    pub reference: String,
    /// Pre-generated transaction id the provider should book under.
    pub transaction_id: String,
}

/// Provider response to a transfer instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferOutcome {
    /// Whether the provider accepted and settled the transfer.
    pub accepted: bool,
    pub message: String,
}

/// Remote money-transfer seam.
///
/// `Err` is reserved for transport/provider failures; a declined transfer is
/// an `Ok` outcome with `accepted: false`.
pub trait MoneyTransferProvider: Send + Sync {
    fn transfer(&self, request: &TransferRequest) -> Result<TransferOutcome, PayoutError>;
}

impl<T: MoneyTransferProvider + ?Sized> MoneyTransferProvider for std::sync::Arc<T> {
    fn transfer(&self, request: &TransferRequest) -> Result<TransferOutcome, PayoutError> {
        (**self).transfer(request)
    }
}
