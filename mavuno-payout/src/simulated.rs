use mavuno_core::errors::PayoutError;
use mavuno_core::traits::{MoneyTransferProvider, TransferOutcome, TransferRequest};

/// Deterministic stand-in for the mobile-money gateway.
///
/// Settles every transfer. Default wiring until a real gateway integration
/// lands; also convenient for demos and smoke runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimulatedMoneyTransfer;

impl MoneyTransferProvider for SimulatedMoneyTransfer {
    fn transfer(&self, request: &TransferRequest) -> Result<TransferOutcome, PayoutError> {
        tracing::info!(
            transaction_id = %request.transaction_id,
            reference = %request.reference,
            amount = request.amount,
            "simulated transfer settled"
        );
        Ok(TransferOutcome {
            accepted: true,
            message: format!("Payment of KES {:.2} sent (simulated)", request.amount),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settles_every_transfer() {
        let outcome = SimulatedMoneyTransfer
            .transfer(&TransferRequest {
                phone_number: "+254712345678".to_string(),
                amount: 5000.0,
                reference: "ref".to_string(),
                transaction_id: "MMABC123DEF456".to_string(),
            })
            .unwrap();
        assert!(outcome.accepted);
        assert_eq!(outcome.message, "Payment of KES 5000.00 sent (simulated)");
    }
}
