use crate::retry::Transient;

/// Payout execution errors.
#[derive(Debug, thiserror::Error)]
pub enum PayoutError {
    #[error("invalid phone number {phone:?}: must be E.164 with {required_prefix} prefix")]
    InvalidPhoneNumber {
        phone: String,
        required_prefix: String,
    },

    #[error("invalid payout amount {amount}: must be greater than 0")]
    InvalidAmount { amount: f64 },

    #[error("money-transfer provider error: {reason}")]
    Provider { reason: String, transient: bool },
}

impl Transient for PayoutError {
    fn is_transient(&self) -> bool {
        matches!(self, Self::Provider { transient: true, .. })
    }
}
