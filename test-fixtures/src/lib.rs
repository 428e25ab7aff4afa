//! Shared test doubles and builders for the Mavuno workspace.
//!
//! Everything here is deterministic: scripted providers replay queued
//! outcomes, the in-memory store keeps claims in a map, and the recording
//! sleeper never actually sleeps.

mod builders;
mod providers;
mod store;

pub use builders::{
    claim, claim_on, date, evidence, evidence_with_avg, nairobi, observation, observation_at,
    ranked, sample, scene,
};
pub use providers::{
    RecordingNotifier, RecordingSleeper, ScriptedEarthObservation, ScriptedTransferProvider,
};
pub use store::InMemoryClaimStore;

use std::sync::Once;

static INIT: Once = Once::new();

/// Install a test-writer tracing subscriber once per process.
/// Honors `RUST_LOG`; silent by default.
pub fn init_test_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
