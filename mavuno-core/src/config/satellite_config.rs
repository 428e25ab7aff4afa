use serde::{Deserialize, Serialize};

use super::defaults;
use crate::retry::RetryPolicy;

/// Satellite evidence retrieval configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SatelliteConfig {
    /// Scenes at or above this cloud-cover percentage are rejected.
    pub max_cloud_cover_pct: f64,
    /// Half-width of the recency window around the claim date (days).
    pub recent_window_days: i64,
    /// Start of the trailing baseline window, counted back from the claim
    /// date (days).
    pub baseline_start_days: i64,
    /// End of the trailing baseline window, counted back from the claim
    /// date (days).
    pub baseline_end_days: i64,
    /// Sampling buffer radius around the claim location (metres).
    pub sample_buffer_m: f64,
    /// Native sampling resolution (metres).
    pub spatial_scale_m: f64,
    /// Evidence cache TTL (seconds).
    pub cache_ttl_secs: u64,
    /// Retry policy for remote provider calls.
    pub retry: RetryPolicy,
}

impl Default for SatelliteConfig {
    fn default() -> Self {
        Self {
            max_cloud_cover_pct: defaults::DEFAULT_MAX_CLOUD_COVER_PCT,
            recent_window_days: defaults::DEFAULT_RECENT_WINDOW_DAYS,
            baseline_start_days: defaults::DEFAULT_BASELINE_START_DAYS,
            baseline_end_days: defaults::DEFAULT_BASELINE_END_DAYS,
            sample_buffer_m: defaults::DEFAULT_SAMPLE_BUFFER_M,
            spatial_scale_m: defaults::DEFAULT_SPATIAL_SCALE_M,
            cache_ttl_secs: defaults::DEFAULT_CACHE_TTL_SECS,
            retry: defaults::DEFAULT_PROVIDER_RETRY,
        }
    }
}
