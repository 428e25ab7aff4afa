//! Single-attempt transfer execution.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use mavuno_core::config::PayoutConfig;
use mavuno_core::errors::PayoutError;
use mavuno_core::models::{AttemptOutcome, PaymentAttempt};
use mavuno_core::traits::{ClaimStore, MoneyTransferProvider, NotificationSender, TransferRequest};

/// Result of one transfer attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct PayoutReceipt {
    pub success: bool,
    pub transaction_id: String,
    pub message: String,
}

/// Executes individual payout attempts against the money-transfer provider.
///
/// Each call to [`send`](PayoutExecutor::send) is one attempt: idempotency
/// across attempts is the caller's job via the claim reference. Every
/// provider interaction is appended to the payment attempt log.
pub struct PayoutExecutor<M> {
    provider: M,
    store: Arc<dyn ClaimStore>,
    notifier: Arc<dyn NotificationSender>,
    config: PayoutConfig,
}

impl<M: MoneyTransferProvider> PayoutExecutor<M> {
    pub fn new(
        provider: M,
        store: Arc<dyn ClaimStore>,
        notifier: Arc<dyn NotificationSender>,
        config: PayoutConfig,
    ) -> Self {
        Self {
            provider,
            store,
            notifier,
            config,
        }
    }

    /// Attempt one transfer.
    ///
    /// Validation failures surface immediately without touching the provider
    /// or the attempt log. A declined transfer is `Ok` with
    /// `success: false`; provider transport failures are `Err` (logged as a
    /// failed attempt first). On a settled transfer a notification goes out
    /// best-effort; its failure never alters `success`.
    pub fn send(
        &self,
        phone_number: &str,
        amount: f64,
        claim_reference: Uuid,
    ) -> Result<PayoutReceipt, PayoutError> {
        self.validate(phone_number, amount)?;

        let transaction_id = new_transaction_id();
        let request = TransferRequest {
            phone_number: phone_number.to_string(),
            amount,
            reference: claim_reference.to_string(),
            transaction_id: transaction_id.clone(),
        };

        tracing::info!(
            claim = %claim_reference,
            transaction_id = %transaction_id,
            amount,
            "payout: initiating transfer"
        );

        match self.provider.transfer(&request) {
            Ok(outcome) => {
                let attempt_outcome = if outcome.accepted {
                    AttemptOutcome::Completed
                } else {
                    AttemptOutcome::Failed
                };
                self.log_attempt(&request, claim_reference, attempt_outcome, &outcome.message);

                if outcome.accepted {
                    self.notify_paid(phone_number, amount, claim_reference);
                } else {
                    tracing::warn!(
                        claim = %claim_reference,
                        transaction_id = %transaction_id,
                        "payout: transfer declined: {}",
                        outcome.message
                    );
                }

                Ok(PayoutReceipt {
                    success: outcome.accepted,
                    transaction_id,
                    message: outcome.message,
                })
            }
            Err(e) => {
                self.log_attempt(
                    &request,
                    claim_reference,
                    AttemptOutcome::Failed,
                    &e.to_string(),
                );
                Err(e)
            }
        }
    }

    fn validate(&self, phone_number: &str, amount: f64) -> Result<(), PayoutError> {
        let digits = phone_number.strip_prefix(&self.config.required_phone_prefix);
        match digits {
            Some(rest) if !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()) => {}
            _ => {
                return Err(PayoutError::InvalidPhoneNumber {
                    phone: phone_number.to_string(),
                    required_prefix: self.config.required_phone_prefix.clone(),
                })
            }
        }
        if !(amount > 0.0) {
            return Err(PayoutError::InvalidAmount { amount });
        }
        Ok(())
    }

    /// Append to the audit log. The log is best-effort relative to the
    /// transfer itself: a store failure is recorded and swallowed so it
    /// cannot change the attempt's outcome.
    fn log_attempt(
        &self,
        request: &TransferRequest,
        claim_id: Uuid,
        outcome: AttemptOutcome,
        message: &str,
    ) {
        let entry = PaymentAttempt {
            transaction_id: request.transaction_id.clone(),
            claim_id,
            phone_number: request.phone_number.clone(),
            amount: request.amount,
            outcome,
            message: message.to_string(),
            created_at: Utc::now(),
        };
        if let Err(e) = self.store.append_payment_log(&entry) {
            tracing::warn!(claim = %claim_id, "payout: failed to append attempt log: {e}");
        }
    }

    fn notify_paid(&self, phone_number: &str, amount: f64, claim_reference: Uuid) {
        let message = format!(
            "MavunoSure: your claim payout of KES {amount:.2} has been sent. \
             Claim ref: {claim_reference}."
        );
        if !self.notifier.notify(phone_number, &message) {
            tracing::warn!(
                claim = %claim_reference,
                "payout: notification dispatch failed"
            );
        }
    }
}

/// Provider-facing transaction id: `MM` plus 12 uppercase hex chars.
fn new_transaction_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("MM{}", hex[..12].to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_ids_have_provider_format() {
        let id = new_transaction_id();
        assert!(id.starts_with("MM"));
        assert_eq!(id.len(), 14);
        assert!(id[2..].chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }
}
