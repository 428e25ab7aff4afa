use serde::{Deserialize, Serialize};

use super::defaults;

/// Payout stage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PayoutConfig {
    /// Transfer attempts per payout cycle.
    pub max_attempts: u32,
    /// Base backoff between attempts (seconds), doubling each attempt.
    pub base_backoff_secs: u64,
    /// Payout amount (KES) applied when a claim has none set.
    pub default_amount: f64,
    /// Required E.164 country prefix for recipient numbers.
    pub required_phone_prefix: String,
}

impl Default for PayoutConfig {
    fn default() -> Self {
        Self {
            max_attempts: defaults::DEFAULT_PAYOUT_MAX_ATTEMPTS,
            base_backoff_secs: defaults::DEFAULT_PAYOUT_BASE_BACKOFF_SECS,
            default_amount: defaults::DEFAULT_PAYOUT_AMOUNT_KES,
            required_phone_prefix: defaults::DEFAULT_PHONE_PREFIX.to_string(),
        }
    }
}
