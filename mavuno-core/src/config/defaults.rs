//! Default configuration values. Satellite constants follow the Sentinel-2
//! query the pipeline was tuned against; financial defaults are the MVP
//! payout scheme.

use crate::retry::RetryPolicy;

pub const DEFAULT_MAX_CLOUD_COVER_PCT: f64 = 20.0;
pub const DEFAULT_RECENT_WINDOW_DAYS: i64 = 3;
pub const DEFAULT_BASELINE_START_DAYS: i64 = 17;
pub const DEFAULT_BASELINE_END_DAYS: i64 = 3;
pub const DEFAULT_SAMPLE_BUFFER_M: f64 = 50.0;
pub const DEFAULT_SPATIAL_SCALE_M: f64 = 20.0;
pub const DEFAULT_CACHE_TTL_SECS: u64 = 86_400;

pub const DEFAULT_PROVIDER_RETRY: RetryPolicy = RetryPolicy {
    max_attempts: 3,
    base_delay_secs: 2,
};

pub const DEFAULT_GROUND_WEIGHT: f64 = 0.6;
pub const DEFAULT_SATELLITE_WEIGHT: f64 = 0.4;
pub const DEFAULT_AUTO_APPROVE_THRESHOLD: f64 = 0.8;
pub const DEFAULT_FLAG_THRESHOLD: f64 = 0.5;

pub const DEFAULT_PAYOUT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_PAYOUT_BASE_BACKOFF_SECS: u64 = 2;
pub const DEFAULT_PAYOUT_AMOUNT_KES: f64 = 5_000.0;
pub const DEFAULT_PHONE_PREFIX: &str = "+254";
