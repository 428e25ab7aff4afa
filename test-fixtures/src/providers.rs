use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use mavuno_core::errors::{EvidenceError, PayoutError};
use mavuno_core::models::GeoPoint;
use mavuno_core::retry::Sleeper;
use mavuno_core::traits::{
    BandSample, EarthObservationProvider, MoneyTransferProvider, NotificationSender, SceneMeta,
    SceneQuery, TransferOutcome, TransferRequest,
};

/// Catalog-backed earth-observation fake.
///
/// `scenes` filters the seeded catalog by the query window and cloud bound,
/// so recency and baseline queries hit the same catalog the way a real
/// archive would. Queued failures are popped one per call, letting tests
/// script transient-then-success sequences.
#[derive(Default)]
pub struct ScriptedEarthObservation {
    catalog: Mutex<Vec<SceneMeta>>,
    samples: Mutex<HashMap<String, BandSample>>,
    scene_failures: Mutex<VecDeque<EvidenceError>>,
    sample_failures: Mutex<VecDeque<EvidenceError>>,
    scenes_calls: AtomicUsize,
    sample_calls: AtomicUsize,
}

impl ScriptedEarthObservation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a scene with the band sample its id resolves to.
    pub fn add_scene(&self, meta: SceneMeta, sample: BandSample) {
        self.samples.lock().unwrap().insert(meta.id.clone(), sample);
        self.catalog.lock().unwrap().push(meta);
    }

    /// Seed a scene with no valid pixels (`sample_bands` returns `None`).
    pub fn add_empty_scene(&self, meta: SceneMeta) {
        self.catalog.lock().unwrap().push(meta);
    }

    /// Queue an error for the next `scenes` call.
    pub fn fail_next_scenes(&self, error: EvidenceError) {
        self.scene_failures.lock().unwrap().push_back(error);
    }

    /// Queue an error for the next `sample_bands` call.
    pub fn fail_next_sample(&self, error: EvidenceError) {
        self.sample_failures.lock().unwrap().push_back(error);
    }

    pub fn scenes_calls(&self) -> usize {
        self.scenes_calls.load(Ordering::SeqCst)
    }

    pub fn sample_calls(&self) -> usize {
        self.sample_calls.load(Ordering::SeqCst)
    }
}

impl EarthObservationProvider for ScriptedEarthObservation {
    fn scenes(&self, query: &SceneQuery) -> Result<Vec<SceneMeta>, EvidenceError> {
        self.scenes_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.scene_failures.lock().unwrap().pop_front() {
            return Err(error);
        }
        Ok(self
            .catalog
            .lock()
            .unwrap()
            .iter()
            .filter(|s| {
                let day = s.observed_at.date_naive();
                day >= query.start && day <= query.end && s.cloud_cover_pct < query.max_cloud_cover_pct
            })
            .cloned()
            .collect())
    }

    fn sample_bands(
        &self,
        scene_id: &str,
        _point: GeoPoint,
        _buffer_m: f64,
        _scale_m: f64,
    ) -> Result<Option<BandSample>, EvidenceError> {
        self.sample_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.sample_failures.lock().unwrap().pop_front() {
            return Err(error);
        }
        Ok(self.samples.lock().unwrap().get(scene_id).copied())
    }
}

/// Money-transfer fake replaying a queued script.
///
/// An empty script settles every transfer, mirroring a sandbox provider.
#[derive(Default)]
pub struct ScriptedTransferProvider {
    script: Mutex<VecDeque<Result<TransferOutcome, PayoutError>>>,
    requests: Mutex<Vec<TransferRequest>>,
}

impl ScriptedTransferProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a settled transfer.
    pub fn accept_next(&self) {
        self.push(Ok(TransferOutcome {
            accepted: true,
            message: "Payment sent (scripted)".to_string(),
        }));
    }

    /// Queue a declined transfer (an `Ok` outcome, not a transport error).
    pub fn decline_next(&self, message: &str) {
        self.push(Ok(TransferOutcome {
            accepted: false,
            message: message.to_string(),
        }));
    }

    /// Queue a transient transport failure.
    pub fn fail_next_transient(&self, reason: &str) {
        self.push(Err(PayoutError::Provider {
            reason: reason.to_string(),
            transient: true,
        }));
    }

    /// Queue a permanent provider failure.
    pub fn fail_next_permanent(&self, reason: &str) {
        self.push(Err(PayoutError::Provider {
            reason: reason.to_string(),
            transient: false,
        }));
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// All transfer requests seen, in order.
    pub fn requests(&self) -> Vec<TransferRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn push(&self, entry: Result<TransferOutcome, PayoutError>) {
        self.script.lock().unwrap().push_back(entry);
    }
}

impl MoneyTransferProvider for ScriptedTransferProvider {
    fn transfer(&self, request: &TransferRequest) -> Result<TransferOutcome, PayoutError> {
        self.requests.lock().unwrap().push(request.clone());
        match self.script.lock().unwrap().pop_front() {
            Some(entry) => entry,
            None => Ok(TransferOutcome {
                accepted: true,
                message: format!("Payment of KES {:.2} sent (simulated)", request.amount),
            }),
        }
    }
}

/// Notification fake recording every message.
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<(String, String)>>,
    fail: AtomicBool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// When set, `notify` records the message but reports failure.
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// `(phone_number, message)` pairs in dispatch order.
    pub fn sent(&self) -> Vec<(String, String)> {
        self.messages.lock().unwrap().clone()
    }
}

impl NotificationSender for RecordingNotifier {
    fn notify(&self, phone_number: &str, message: &str) -> bool {
        self.messages
            .lock()
            .unwrap()
            .push((phone_number.to_string(), message.to_string()));
        !self.fail.load(Ordering::SeqCst)
    }
}

/// Sleeper that records requested delays instead of blocking.
#[derive(Default)]
pub struct RecordingSleeper {
    delays: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delays(&self) -> Vec<Duration> {
        self.delays.lock().unwrap().clone()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) {
        self.delays.lock().unwrap().push(duration);
    }
}
