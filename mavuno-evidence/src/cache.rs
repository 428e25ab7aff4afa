//! Evidence cache using moka.
//!
//! Keyed by a (rounded location, claim date) fingerprint so repeated
//! submissions from the same plot on the same day reuse one satellite query.
//! The cache is best-effort: the in-process store cannot fail, and any
//! remote-cache replacement must keep misses and write no-ops silent.

use std::time::Duration;

use chrono::NaiveDate;
use moka::sync::Cache;

use mavuno_core::constants::FINGERPRINT_COORD_DECIMALS;
use mavuno_core::models::{GeoPoint, SatelliteEvidence};

/// TTL cache mapping evidence fingerprints to computed satellite evidence.
pub struct EvidenceCache {
    cache: Cache<String, SatelliteEvidence>,
}

impl EvidenceCache {
    /// Create a cache whose entries expire after `ttl`.
    pub fn new(ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(100_000)
            .time_to_live(ttl)
            .build();
        Self { cache }
    }

    /// Fingerprint for a claim location and calendar date.
    ///
    /// Coordinates are rounded to 4 decimal places (~11 m) to absorb GPS
    /// jitter; the claim date (not the satellite observation date) keeps the
    /// key computable before any network call.
    pub fn fingerprint(point: GeoPoint, claim_date: NaiveDate) -> String {
        format!(
            "satellite:{lat:.prec$}:{lng:.prec$}:{date}",
            lat = round_coord(point.lat),
            lng = round_coord(point.lng),
            date = claim_date.format("%Y-%m-%d"),
            prec = FINGERPRINT_COORD_DECIMALS as usize,
        )
    }

    pub fn get(&self, fingerprint: &str) -> Option<SatelliteEvidence> {
        self.cache.get(fingerprint)
    }

    pub fn put(&self, fingerprint: String, evidence: SatelliteEvidence) {
        self.cache.insert(fingerprint, evidence);
    }

    /// Number of live entries.
    pub fn len(&self) -> u64 {
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Round to the fingerprint precision, normalizing negative zero so jitter
/// straddling the equator or prime meridian lands on one entry.
fn round_coord(value: f64) -> f64 {
    let scale = 10f64.powi(FINGERPRINT_COORD_DECIMALS as i32);
    (value * scale).round() / scale + 0.0
}
