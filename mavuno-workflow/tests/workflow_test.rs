//! Full pipeline runs over scripted providers: evidence attachment,
//! adjudication, the payout cycle, and manual payout recovery.

use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use mavuno_core::config::{PayoutConfig, SatelliteConfig};
use mavuno_core::errors::{MavunoError, WorkflowError};
use mavuno_core::traits::ClaimStore;
use mavuno_core::models::{
    AttemptOutcome, ClaimStatus, CropCondition, DecisionStatus, PayoutStatus,
};
use mavuno_evidence::SatelliteEvidenceClient;
use mavuno_payout::PayoutExecutor;
use mavuno_verify::VerificationEngine;
use mavuno_workflow::{ClaimWorkflowOrchestrator, PayoutOutcome};
use test_fixtures::{
    claim_on, date, evidence, sample, scene, InMemoryClaimStore, RecordingNotifier,
    RecordingSleeper, ScriptedEarthObservation, ScriptedTransferProvider,
};

struct Harness {
    store: Arc<InMemoryClaimStore>,
    eo: Arc<ScriptedEarthObservation>,
    transfers: Arc<ScriptedTransferProvider>,
    notifier: Arc<RecordingNotifier>,
    sleeper: Arc<RecordingSleeper>,
    orchestrator:
        ClaimWorkflowOrchestrator<Arc<ScriptedEarthObservation>, Arc<ScriptedTransferProvider>>,
}

fn harness() -> Harness {
    test_fixtures::init_test_tracing();
    let store = Arc::new(InMemoryClaimStore::new());
    let eo = Arc::new(ScriptedEarthObservation::new());
    let transfers = Arc::new(ScriptedTransferProvider::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let sleeper = Arc::new(RecordingSleeper::new());

    let evidence_client = SatelliteEvidenceClient::with_sleeper(
        eo.clone(),
        SatelliteConfig::default(),
        sleeper.clone(),
    );
    let payout = PayoutExecutor::new(
        transfers.clone(),
        store.clone(),
        notifier.clone(),
        PayoutConfig::default(),
    );
    let orchestrator = ClaimWorkflowOrchestrator::with_sleeper(
        store.clone(),
        evidence_client,
        VerificationEngine::default(),
        payout,
        PayoutConfig::default(),
        sleeper.clone(),
    );

    Harness {
        store,
        eo,
        transfers,
        notifier,
        sleeper,
        orchestrator,
    }
}

/// Seed a pending drought claim plus a clear scene whose bands derive a
/// severe moisture deficit.
fn seed_drought_claim(h: &Harness) -> Uuid {
    let claim = claim_on(CropCondition::DroughtStress, 0.9, date(2025, 3, 10));
    let id = claim.id;
    h.store.insert(claim);
    h.eo
        .add_scene(scene("clear", date(2025, 3, 10), 5.0), sample(0.3, 0.5));
    id
}

/// Seed a claim already adjudicated to auto-approved, evidence attached.
fn seed_approved_claim(h: &Harness) -> Uuid {
    let mut claim = claim_on(CropCondition::DroughtStress, 0.9, date(2025, 3, 10));
    claim.attach_evidence(evidence(-0.25));
    let id = claim.id;
    h.store.insert(claim);
    h.orchestrator.adjudicate(id).unwrap();
    id
}

#[test]
fn pending_claim_runs_end_to_end() {
    let h = harness();
    let id = seed_drought_claim(&h);

    let ev = h.orchestrator.fetch_evidence(id).unwrap();
    assert!((ev.ndmi - (-0.25)).abs() < 1e-12);

    let decision = h.orchestrator.adjudicate(id).unwrap();
    assert_eq!(decision.status, DecisionStatus::AutoApproved);

    let outcome = h.orchestrator.execute_payout(id).unwrap();
    let transaction_id = match outcome {
        PayoutOutcome::Paid { transaction_id } => transaction_id,
        other => panic!("expected paid, got {other:?}"),
    };

    let claim = h.store.get(id).unwrap();
    assert_eq!(claim.status, ClaimStatus::Paid);
    assert_eq!(claim.payout.status, PayoutStatus::Completed);
    assert_eq!(claim.payout.amount, Some(5000.0));
    assert_eq!(claim.payout.provider_reference, Some(transaction_id));

    let requests = h.transfers.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].phone_number, "+254712345678");
    assert_eq!(requests[0].amount, 5000.0);

    assert_eq!(h.notifier.sent().len(), 1);
    assert_eq!(h.store.payment_log(id).unwrap().len(), 1);
}

#[test]
fn fetch_evidence_is_idempotent() {
    let h = harness();
    let id = seed_drought_claim(&h);

    let first = h.orchestrator.fetch_evidence(id).unwrap();
    let calls = h.eo.scenes_calls();

    // Evidence is already attached, so the provider is not consulted again.
    let second = h.orchestrator.fetch_evidence(id).unwrap();
    assert_eq!(first, second);
    assert_eq!(h.eo.scenes_calls(), calls);
}

#[test]
fn adjudicate_requires_attached_evidence() {
    let h = harness();
    let claim = claim_on(CropCondition::DroughtStress, 0.9, date(2025, 3, 10));
    let id = claim.id;
    h.store.insert(claim);

    let error = h.orchestrator.adjudicate(id).unwrap_err();
    assert!(matches!(
        error,
        MavunoError::Workflow(WorkflowError::EvidenceNotAttached { .. })
    ));
}

#[test]
fn unknown_claims_are_reported() {
    let h = harness();
    let error = h.orchestrator.fetch_evidence(Uuid::new_v4()).unwrap_err();
    assert!(matches!(
        error,
        MavunoError::Workflow(WorkflowError::ClaimNotFound { .. })
    ));
}

#[test]
fn paid_claims_keep_their_decision_on_readjudication() {
    let h = harness();
    let id = seed_approved_claim(&h);
    h.orchestrator.execute_payout(id).unwrap();

    let decision = h.orchestrator.adjudicate(id).unwrap();
    assert_eq!(decision.status, DecisionStatus::AutoApproved);
    assert_eq!(h.store.get(id).unwrap().status, ClaimStatus::Paid);
}

#[test]
fn payout_retries_transient_failures_then_settles() {
    let h = harness();
    let id = seed_approved_claim(&h);
    h.transfers.fail_next_transient("gateway timeout");
    h.transfers.fail_next_transient("gateway timeout");

    let outcome = h.orchestrator.execute_payout(id).unwrap();
    assert!(matches!(outcome, PayoutOutcome::Paid { .. }));

    assert_eq!(h.transfers.calls(), 3);
    assert_eq!(
        h.sleeper.delays(),
        vec![Duration::from_secs(2), Duration::from_secs(4)]
    );

    let log = h.store.payment_log(id).unwrap();
    assert_eq!(log.len(), 3);
    assert_eq!(log[0].outcome, AttemptOutcome::Failed);
    assert_eq!(log[1].outcome, AttemptOutcome::Failed);
    assert_eq!(log[2].outcome, AttemptOutcome::Completed);
    assert_eq!(h.notifier.sent().len(), 1);
}

#[test]
fn exhausted_payout_parks_for_manual_review() {
    let h = harness();
    let id = seed_approved_claim(&h);
    for _ in 0..3 {
        h.transfers.fail_next_transient("gateway timeout");
    }

    let outcome = h.orchestrator.execute_payout(id).unwrap();
    assert_eq!(outcome, PayoutOutcome::Flagged);

    let claim = h.store.get(id).unwrap();
    assert_eq!(claim.status, ClaimStatus::AutoApproved);
    assert_eq!(claim.payout.status, PayoutStatus::FailedNeedsManualReview);
    assert!(claim.is_terminal());

    assert_eq!(h.transfers.calls(), 3);
    assert_eq!(h.store.payment_log(id).unwrap().len(), 3);
    assert!(h.notifier.sent().is_empty());
    // No sleep after the final attempt.
    assert_eq!(h.sleeper.delays().len(), 2);
}

#[test]
fn declined_transfers_are_retried_like_failures() {
    let h = harness();
    let id = seed_approved_claim(&h);
    for _ in 0..3 {
        h.transfers.decline_next("insufficient float");
    }

    let outcome = h.orchestrator.execute_payout(id).unwrap();
    assert_eq!(outcome, PayoutOutcome::Flagged);
    assert_eq!(h.transfers.calls(), 3);
}

#[test]
fn permanent_failures_park_without_retrying() {
    let h = harness();
    let id = seed_approved_claim(&h);
    h.transfers.fail_next_permanent("account blocked");

    let outcome = h.orchestrator.execute_payout(id).unwrap();
    assert_eq!(outcome, PayoutOutcome::Flagged);
    assert_eq!(h.transfers.calls(), 1);
    assert!(h.sleeper.delays().is_empty());
    assert_eq!(
        h.store.get(id).unwrap().payout.status,
        PayoutStatus::FailedNeedsManualReview
    );
}

#[test]
fn payout_is_skipped_unless_auto_approved() {
    let h = harness();
    // Drought against a normal verdict flags for review.
    let mut claim = claim_on(CropCondition::DroughtStress, 0.9, date(2025, 3, 10));
    claim.attach_evidence(evidence(0.05));
    let id = claim.id;
    h.store.insert(claim);
    h.orchestrator.adjudicate(id).unwrap();

    let outcome = h.orchestrator.execute_payout(id).unwrap();
    assert_eq!(outcome, PayoutOutcome::Skipped);
    assert_eq!(h.transfers.calls(), 0);
    assert_eq!(h.store.get(id).unwrap().payout.status, PayoutStatus::Unset);
}

#[test]
fn parked_payout_is_skipped_until_manually_retried() {
    let h = harness();
    let id = seed_approved_claim(&h);
    for _ in 0..3 {
        h.transfers.fail_next_transient("gateway timeout");
    }
    h.orchestrator.execute_payout(id).unwrap();
    assert_eq!(h.transfers.calls(), 3);

    // A scheduler re-run must not restart the cycle on its own.
    let outcome = h.orchestrator.execute_payout(id).unwrap();
    assert_eq!(outcome, PayoutOutcome::Skipped);
    assert_eq!(h.transfers.calls(), 3);
}

#[test]
fn manual_retry_resumes_a_parked_payout() {
    let h = harness();
    let id = seed_approved_claim(&h);
    for _ in 0..3 {
        h.transfers.fail_next_transient("gateway timeout");
    }
    h.orchestrator.execute_payout(id).unwrap();

    // Script is now empty, so the next attempt settles.
    let paid = h.orchestrator.retry_manual_payout(id).unwrap();
    assert!(paid);

    let claim = h.store.get(id).unwrap();
    assert_eq!(claim.status, ClaimStatus::Paid);
    assert_eq!(claim.payout.status, PayoutStatus::Completed);
    assert_eq!(h.transfers.calls(), 4);
}

#[test]
fn manual_retry_is_a_noop_for_unparked_claims() {
    let h = harness();
    let id = seed_approved_claim(&h);

    let paid = h.orchestrator.retry_manual_payout(id).unwrap();
    assert!(!paid);
    assert_eq!(h.transfers.calls(), 0);
    assert_eq!(h.store.get(id).unwrap().status, ClaimStatus::AutoApproved);
}
