use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use uuid::Uuid;

use mavuno_core::errors::{MavunoResult, StoreError};
use mavuno_core::models::{Claim, PaymentAttempt};
use mavuno_core::traits::ClaimStore;

/// Map-backed claim store with an append-only payment log.
#[derive(Default)]
pub struct InMemoryClaimStore {
    claims: Mutex<HashMap<Uuid, Claim>>,
    log: Mutex<Vec<PaymentAttempt>>,
    fail_appends: AtomicBool,
}

impl InMemoryClaimStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a claim directly, bypassing the trait.
    pub fn insert(&self, claim: Claim) {
        self.claims.lock().unwrap().insert(claim.id, claim);
    }

    /// Snapshot of a stored claim.
    pub fn get(&self, claim_id: Uuid) -> Option<Claim> {
        self.claims.lock().unwrap().get(&claim_id).cloned()
    }

    /// When set, `append_payment_log` fails until cleared.
    pub fn set_fail_appends(&self, fail: bool) {
        self.fail_appends.store(fail, Ordering::SeqCst);
    }

    /// Every logged attempt across all claims, oldest first.
    pub fn full_log(&self) -> Vec<PaymentAttempt> {
        self.log.lock().unwrap().clone()
    }
}

impl ClaimStore for InMemoryClaimStore {
    fn load(&self, claim_id: Uuid) -> MavunoResult<Option<Claim>> {
        Ok(self.claims.lock().unwrap().get(&claim_id).cloned())
    }

    fn save(&self, claim: &Claim) -> MavunoResult<()> {
        self.claims.lock().unwrap().insert(claim.id, claim.clone());
        Ok(())
    }

    fn append_payment_log(&self, entry: &PaymentAttempt) -> MavunoResult<()> {
        if self.fail_appends.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable {
                reason: "scripted append failure".to_string(),
            }
            .into());
        }
        self.log.lock().unwrap().push(entry.clone());
        Ok(())
    }

    fn payment_log(&self, claim_id: Uuid) -> MavunoResult<Vec<PaymentAttempt>> {
        Ok(self
            .log
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.claim_id == claim_id)
            .cloned()
            .collect())
    }
}
