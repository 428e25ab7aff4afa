//! Stage-by-stage claim progression.

use std::sync::Arc;

use uuid::Uuid;

use mavuno_core::config::PayoutConfig;
use mavuno_core::errors::{MavunoResult, WorkflowError};
use mavuno_core::models::{Claim, ClaimStatus, PayoutStatus, SatelliteEvidence, VerificationDecision};
use mavuno_core::retry::{RetryPolicy, Sleeper, ThreadSleeper, Transient};
use mavuno_core::traits::{ClaimStore, EarthObservationProvider, MoneyTransferProvider};
use mavuno_evidence::SatelliteEvidenceClient;
use mavuno_payout::PayoutExecutor;
use mavuno_verify::VerificationEngine;

/// How a payout cycle ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayoutOutcome {
    /// Transfer settled; the claim is paid.
    Paid { transaction_id: String },
    /// Attempts exhausted or a permanent failure; parked for manual review.
    Flagged,
    /// The claim was not eligible for payout; nothing was attempted.
    Skipped,
}

/// Orchestrates the claim pipeline over the persistence and provider seams.
///
/// Every entry point is safe to re-invoke: completed stages return their
/// stored result instead of re-running, and a parked payout stays parked
/// until [`retry_manual_payout`](ClaimWorkflowOrchestrator::retry_manual_payout)
/// is called explicitly.
pub struct ClaimWorkflowOrchestrator<P, M> {
    store: Arc<dyn ClaimStore>,
    evidence: SatelliteEvidenceClient<P>,
    engine: VerificationEngine,
    payout: PayoutExecutor<M>,
    payout_config: PayoutConfig,
    sleeper: Arc<dyn Sleeper>,
}

impl<P: EarthObservationProvider, M: MoneyTransferProvider> ClaimWorkflowOrchestrator<P, M> {
    pub fn new(
        store: Arc<dyn ClaimStore>,
        evidence: SatelliteEvidenceClient<P>,
        engine: VerificationEngine,
        payout: PayoutExecutor<M>,
        payout_config: PayoutConfig,
    ) -> Self {
        Self::with_sleeper(
            store,
            evidence,
            engine,
            payout,
            payout_config,
            Arc::new(ThreadSleeper),
        )
    }

    /// Construct with an explicit sleeper (tests pass a recording no-op).
    pub fn with_sleeper(
        store: Arc<dyn ClaimStore>,
        evidence: SatelliteEvidenceClient<P>,
        engine: VerificationEngine,
        payout: PayoutExecutor<M>,
        payout_config: PayoutConfig,
        sleeper: Arc<dyn Sleeper>,
    ) -> Self {
        Self {
            store,
            evidence,
            engine,
            payout,
            payout_config,
            sleeper,
        }
    }

    /// Retrieve and attach satellite evidence for a claim.
    ///
    /// Already-attached evidence is returned as-is without touching the
    /// provider, so schedulers can re-invoke this stage freely.
    pub fn fetch_evidence(&self, claim_id: Uuid) -> MavunoResult<SatelliteEvidence> {
        let mut claim = self.load(claim_id)?;

        if let Some(existing) = &claim.evidence {
            tracing::info!(claim = %claim_id, "workflow: evidence already attached");
            return Ok(existing.clone());
        }

        let evidence = self.evidence.fetch(claim.location, claim.created_at)?;
        claim.attach_evidence(evidence.clone());
        self.store.save(&claim)?;

        tracing::info!(
            claim = %claim_id,
            ndmi = evidence.ndmi,
            verdict = %evidence.verdict(),
            "workflow: evidence attached"
        );
        Ok(evidence)
    }

    /// Adjudicate a claim against its attached evidence.
    ///
    /// Re-adjudication overwrites the stored decision and re-mirrors the
    /// lifecycle status, except on a paid claim, which returns its existing
    /// decision untouched.
    pub fn adjudicate(&self, claim_id: Uuid) -> MavunoResult<VerificationDecision> {
        let mut claim = self.load(claim_id)?;

        if claim.status == ClaimStatus::Paid {
            if let Some(existing) = &claim.decision {
                tracing::info!(claim = %claim_id, "workflow: claim already paid, decision kept");
                return Ok(existing.clone());
            }
        }

        let evidence = claim
            .evidence
            .clone()
            .ok_or(WorkflowError::EvidenceNotAttached { claim_id })?;

        let decision = self
            .engine
            .evaluate(&claim.observation, &evidence, Some(claim.created_at));
        claim.attach_decision(decision.clone());
        self.store.save(&claim)?;

        tracing::info!(
            claim = %claim_id,
            status = %claim.status,
            rule = %decision.rule_applied,
            "workflow: adjudicated"
        );
        Ok(decision)
    }

    /// Run the payout cycle for an auto-approved claim.
    ///
    /// Ineligible claims (not auto-approved, or parked for manual review)
    /// are skipped without a transfer attempt. The claim's payout amount is
    /// defaulted from config when unset, and the payout record is marked
    /// pending before the first attempt so an interrupted cycle is visible.
    pub fn execute_payout(&self, claim_id: Uuid) -> MavunoResult<PayoutOutcome> {
        let mut claim = self.load(claim_id)?;

        if claim.status != ClaimStatus::AutoApproved {
            tracing::info!(
                claim = %claim_id,
                status = %claim.status,
                "workflow: payout skipped, claim not auto-approved"
            );
            return Ok(PayoutOutcome::Skipped);
        }
        if claim.payout.status == PayoutStatus::FailedNeedsManualReview {
            tracing::info!(
                claim = %claim_id,
                "workflow: payout parked for manual review, skipping"
            );
            return Ok(PayoutOutcome::Skipped);
        }

        let amount = match claim.payout.amount {
            Some(amount) => amount,
            None => {
                let amount = self.payout_config.default_amount;
                claim.payout.amount = Some(amount);
                tracing::info!(claim = %claim_id, amount, "workflow: payout amount defaulted");
                amount
            }
        };
        claim.payout.status = PayoutStatus::Pending;
        self.store.save(&claim)?;

        self.payout_cycle(&mut claim, amount)
    }

    /// Bounded attempt loop. A settled transfer pays the claim; exhaustion
    /// or a permanent failure parks the payout for manual review.
    fn payout_cycle(&self, claim: &mut Claim, amount: f64) -> MavunoResult<PayoutOutcome> {
        let policy = RetryPolicy::new(
            self.payout_config.max_attempts,
            self.payout_config.base_backoff_secs,
        );
        let mut attempt = 0u32;

        loop {
            match self.payout.send(&claim.farmer_phone, amount, claim.id) {
                Ok(receipt) if receipt.success => {
                    claim.mark_paid(&receipt.transaction_id);
                    self.store.save(claim)?;
                    tracing::info!(
                        claim = %claim.id,
                        transaction_id = %receipt.transaction_id,
                        "workflow: claim paid"
                    );
                    return Ok(PayoutOutcome::Paid {
                        transaction_id: receipt.transaction_id,
                    });
                }
                Ok(receipt) => {
                    tracing::warn!(
                        claim = %claim.id,
                        attempt = attempt + 1,
                        "workflow: transfer declined: {}",
                        receipt.message
                    );
                }
                Err(e) if !e.is_transient() => {
                    tracing::warn!(
                        claim = %claim.id,
                        "workflow: permanent payout failure, parking for review: {e}"
                    );
                    claim.flag_payout_for_review();
                    self.store.save(claim)?;
                    return Ok(PayoutOutcome::Flagged);
                }
                Err(e) => {
                    tracing::warn!(
                        claim = %claim.id,
                        attempt = attempt + 1,
                        "workflow: transfer attempt failed: {e}"
                    );
                }
            }

            attempt += 1;
            if attempt >= policy.max_attempts {
                tracing::warn!(
                    claim = %claim.id,
                    attempts = attempt,
                    "workflow: payout attempts exhausted, parking for review"
                );
                claim.flag_payout_for_review();
                self.store.save(claim)?;
                return Ok(PayoutOutcome::Flagged);
            }
            self.sleeper.sleep(policy.delay_after(attempt - 1));
        }
    }

    /// Explicit human re-trigger for a payout parked in manual review.
    ///
    /// Resets the payout to pending and runs a fresh cycle. Returns whether
    /// the claim ended up paid; claims not parked for review are a no-op
    /// `false`.
    pub fn retry_manual_payout(&self, claim_id: Uuid) -> MavunoResult<bool> {
        let mut claim = self.load(claim_id)?;

        if claim.payout.status != PayoutStatus::FailedNeedsManualReview {
            tracing::warn!(
                claim = %claim_id,
                payout_status = %claim.payout.status,
                "workflow: manual retry requested but payout is not parked"
            );
            return Ok(false);
        }

        claim.payout.status = PayoutStatus::Pending;
        self.store.save(&claim)?;
        tracing::info!(claim = %claim_id, "workflow: manual payout retry");

        match self.execute_payout(claim_id)? {
            PayoutOutcome::Paid { .. } => Ok(true),
            PayoutOutcome::Flagged | PayoutOutcome::Skipped => Ok(false),
        }
    }

    fn load(&self, claim_id: Uuid) -> MavunoResult<Claim> {
        self.store
            .load(claim_id)?
            .ok_or_else(|| WorkflowError::ClaimNotFound { claim_id }.into())
    }
}
