//! # mavuno-workflow
//!
//! Drives a claim through the pipeline: satellite evidence retrieval,
//! adjudication, and the payout cycle with bounded retries. Each entry
//! point loads the claim, advances one stage, and persists the result, so
//! a claim can resume from wherever a previous run stopped.

mod orchestrator;

pub use orchestrator::{ClaimWorkflowOrchestrator, PayoutOutcome};
