use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Three-level categorical summary of the moisture index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoistureVerdict {
    SevereStress,
    ModerateStress,
    Normal,
}

impl MoistureVerdict {
    /// Derive the verdict from a current moisture index.
    ///
    /// Total over all finite inputs: `< -0.2` severe, `< -0.1` moderate,
    /// otherwise normal.
    pub fn from_index(ndmi: f64) -> Self {
        if ndmi < -0.2 {
            Self::SevereStress
        } else if ndmi < -0.1 {
            Self::ModerateStress
        } else {
            Self::Normal
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::SevereStress => "severe_stress",
            Self::ModerateStress => "moderate_stress",
            Self::Normal => "normal",
        }
    }
}

impl fmt::Display for MoistureVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Satellite-derived moisture evidence for one claim location and date.
/// Immutable once computed; cacheable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SatelliteEvidence {
    /// Current moisture index sampled around the claim location.
    pub ndmi: f64,
    /// Trailing 14-day average index. 0.0 (neutral) when no baseline
    /// imagery qualified.
    pub ndmi_14day_avg: f64,
    /// Date of the satellite pass the current index came from.
    pub observed_at: DateTime<Utc>,
    /// Cloud cover of the selected scene, percent.
    pub cloud_cover_pct: f64,
}

impl SatelliteEvidence {
    /// The verdict is always a pure function of the current index and is
    /// never stored independently of it.
    pub fn verdict(&self) -> MoistureVerdict {
        MoistureVerdict::from_index(self.ndmi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdict_thresholds() {
        assert_eq!(
            MoistureVerdict::from_index(-0.25),
            MoistureVerdict::SevereStress
        );
        assert_eq!(
            MoistureVerdict::from_index(-0.15),
            MoistureVerdict::ModerateStress
        );
        assert_eq!(MoistureVerdict::from_index(0.1), MoistureVerdict::Normal);
    }

    #[test]
    fn verdict_boundaries() {
        // Exactly -0.2 is moderate, exactly -0.1 is normal.
        assert_eq!(
            MoistureVerdict::from_index(-0.2),
            MoistureVerdict::ModerateStress
        );
        assert_eq!(MoistureVerdict::from_index(-0.1), MoistureVerdict::Normal);
    }
}
