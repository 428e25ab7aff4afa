mod defaults;
mod payout_config;
mod satellite_config;
mod verification_config;

pub use payout_config::PayoutConfig;
pub use satellite_config::SatelliteConfig;
pub use verification_config::VerificationWeights;

use serde::{Deserialize, Serialize};

/// Aggregate configuration for the whole pipeline, TOML-loadable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MavunoConfig {
    pub satellite: SatelliteConfig,
    pub verification: VerificationWeights,
    pub payout: PayoutConfig,
}

impl MavunoConfig {
    /// Parse a TOML document; missing sections and keys fall back to defaults.
    pub fn from_toml_str(input: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = MavunoConfig::from_toml_str("").unwrap();
        assert_eq!(config.satellite.max_cloud_cover_pct, 20.0);
        assert_eq!(config.verification.ground_weight, 0.6);
        assert_eq!(config.payout.max_attempts, 3);
    }

    #[test]
    fn partial_overrides_keep_other_defaults() {
        let config = MavunoConfig::from_toml_str(
            r#"
            [payout]
            default_amount = 7500.0
            "#,
        )
        .unwrap();
        assert_eq!(config.payout.default_amount, 7500.0);
        assert_eq!(config.payout.max_attempts, 3);
        assert_eq!(config.satellite.cache_ttl_secs, 86_400);
    }
}
