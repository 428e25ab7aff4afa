//! # mavuno-payout
//!
//! One payout attempt at a time: validate inputs, instruct the
//! money-transfer provider, append the attempt to the audit log, and on
//! success dispatch a best-effort notification. Retry cycles and claim
//! state transitions belong to the workflow orchestrator.

mod executor;
mod simulated;

pub use executor::{PayoutExecutor, PayoutReceipt};
pub use simulated::SimulatedMoneyTransfer;
