//! Cache-first moisture evidence retrieval.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};

use mavuno_core::config::SatelliteConfig;
use mavuno_core::errors::EvidenceError;
use mavuno_core::models::{GeoPoint, SatelliteEvidence};
use mavuno_core::retry::{Sleeper, ThreadSleeper};
use mavuno_core::traits::{EarthObservationProvider, SceneMeta, SceneQuery};

use crate::cache::EvidenceCache;

/// Normalized difference of the moisture-sensitive band pair:
/// `(B8A − B11) / (B8A + B11)`. `None` on a degenerate zero-sum sample.
pub fn normalized_difference(nir_narrow: f64, swir: f64) -> Option<f64> {
    let denominator = nir_narrow + swir;
    if denominator == 0.0 || !denominator.is_finite() {
        None
    } else {
        Some((nir_narrow - swir) / denominator)
    }
}

/// Client over a remote earth-observation provider.
///
/// Fetch order: cache, then least-cloudy scene in the recency window, then
/// index derivation and trailing baseline, then cache write-back. Remote
/// calls retry with exponential backoff on transient provider errors only.
pub struct SatelliteEvidenceClient<P> {
    provider: P,
    cache: EvidenceCache,
    config: SatelliteConfig,
    sleeper: Arc<dyn Sleeper>,
}

impl<P: EarthObservationProvider> SatelliteEvidenceClient<P> {
    pub fn new(provider: P, config: SatelliteConfig) -> Self {
        Self::with_sleeper(provider, config, Arc::new(ThreadSleeper))
    }

    /// Construct with an explicit sleeper (tests pass a recording no-op).
    pub fn with_sleeper(provider: P, config: SatelliteConfig, sleeper: Arc<dyn Sleeper>) -> Self {
        let cache = EvidenceCache::new(Duration::from_secs(config.cache_ttl_secs));
        Self {
            provider,
            cache,
            config,
            sleeper,
        }
    }

    /// Fetch moisture evidence for a claim location and date.
    ///
    /// Fails with `NoSuitableImagery` when no scene in the ±recency window
    /// clears the cloud-cover bound, or with `Provider` once retries are
    /// exhausted.
    pub fn fetch(
        &self,
        point: GeoPoint,
        claim_date: DateTime<Utc>,
    ) -> Result<SatelliteEvidence, EvidenceError> {
        let date = claim_date.date_naive();
        let fingerprint = EvidenceCache::fingerprint(point, date);

        if let Some(hit) = self.cache.get(&fingerprint) {
            tracing::info!(%fingerprint, "evidence: cache hit");
            return Ok(hit);
        }

        tracing::info!(lat = point.lat, lng = point.lng, %date, "evidence: querying provider");
        let evidence = self.query(point, date)?;
        self.cache.put(fingerprint, evidence.clone());
        Ok(evidence)
    }

    fn query(&self, point: GeoPoint, date: NaiveDate) -> Result<SatelliteEvidence, EvidenceError> {
        let window = chrono::Duration::days(self.config.recent_window_days);
        let query = SceneQuery {
            point,
            start: date - window,
            end: date + window,
            max_cloud_cover_pct: self.config.max_cloud_cover_pct,
        };

        let scenes = self
            .config
            .retry
            .run(&*self.sleeper, "eo.scenes", || self.provider.scenes(&query))?;

        let best = least_cloudy(scenes, self.config.max_cloud_cover_pct).ok_or(
            EvidenceError::NoSuitableImagery {
                lat: point.lat,
                lng: point.lng,
                window_start: query.start,
                window_end: query.end,
                max_cloud_cover_pct: self.config.max_cloud_cover_pct,
            },
        )?;

        let ndmi = self
            .scene_index(&best.id, point)?
            .ok_or_else(|| EvidenceError::EmptySample {
                scene_id: best.id.clone(),
            })?;

        let ndmi_14day_avg = self.baseline_index(point, date)?;

        tracing::info!(
            scene = %best.id,
            ndmi,
            ndmi_14day_avg,
            cloud_cover_pct = best.cloud_cover_pct,
            "evidence: computed"
        );

        Ok(SatelliteEvidence {
            ndmi,
            ndmi_14day_avg,
            observed_at: best.observed_at,
            cloud_cover_pct: best.cloud_cover_pct,
        })
    }

    /// Moisture index for one scene, averaged over the configured buffer.
    fn scene_index(&self, scene_id: &str, point: GeoPoint) -> Result<Option<f64>, EvidenceError> {
        let sample = self.config.retry.run(&*self.sleeper, "eo.sample_bands", || {
            self.provider.sample_bands(
                scene_id,
                point,
                self.config.sample_buffer_m,
                self.config.spatial_scale_m,
            )
        })?;
        Ok(sample.and_then(|s| normalized_difference(s.nir_narrow, s.swir)))
    }

    /// Trailing baseline: mean index across qualifying scenes in
    /// `[date - baseline_start_days, date - baseline_end_days]`.
    /// No qualifying imagery yields the neutral 0.0, not an error.
    fn baseline_index(&self, point: GeoPoint, date: NaiveDate) -> Result<f64, EvidenceError> {
        let query = SceneQuery {
            point,
            start: date - chrono::Duration::days(self.config.baseline_start_days),
            end: date - chrono::Duration::days(self.config.baseline_end_days),
            max_cloud_cover_pct: self.config.max_cloud_cover_pct,
        };

        let scenes = self
            .config
            .retry
            .run(&*self.sleeper, "eo.baseline_scenes", || {
                self.provider.scenes(&query)
            })?;

        let mut values = Vec::with_capacity(scenes.len());
        for scene in scenes
            .iter()
            .filter(|s| s.cloud_cover_pct < self.config.max_cloud_cover_pct)
        {
            if let Some(value) = self.scene_index(&scene.id, point)? {
                values.push(value);
            }
        }

        if values.is_empty() {
            tracing::warn!(
                start = %query.start,
                end = %query.end,
                "evidence: no baseline imagery, defaulting to neutral 0.0"
            );
            return Ok(0.0);
        }
        Ok(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Least-cloudy scene strictly under the cloud-cover bound.
fn least_cloudy(scenes: Vec<SceneMeta>, max_cloud_cover_pct: f64) -> Option<SceneMeta> {
    scenes
        .into_iter()
        .filter(|s| s.cloud_cover_pct < max_cloud_cover_pct)
        .min_by(|a, b| a.cloud_cover_pct.total_cmp(&b.cloud_cover_pct))
}
