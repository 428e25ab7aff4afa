use chrono::{DateTime, TimeZone, Utc};

use mavuno_core::models::{
    Claim, Confidence, CropCondition, GeoPoint, GroundObservation, RankedCondition,
    SatelliteEvidence,
};
use mavuno_core::traits::{BandSample, SceneMeta};

/// Nairobi-area test farm location.
pub fn nairobi() -> GeoPoint {
    GeoPoint::new(-1.2921, 36.8219).expect("valid coordinates")
}

/// Midnight UTC on the given day.
pub fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .expect("valid date")
}

pub fn ranked(condition: CropCondition, confidence: f64) -> RankedCondition {
    RankedCondition {
        condition,
        confidence: Confidence::new(confidence),
    }
}

pub fn observation(condition: CropCondition, confidence: f64) -> GroundObservation {
    observation_at(condition, confidence, date(2025, 3, 10))
}

pub fn observation_at(
    condition: CropCondition,
    confidence: f64,
    captured_at: DateTime<Utc>,
) -> GroundObservation {
    GroundObservation {
        condition,
        confidence: Confidence::new(confidence),
        ranked: vec![ranked(condition, confidence)],
        device_tilt: None,
        device_azimuth: None,
        capture_location: None,
        captured_at,
    }
}

pub fn evidence(ndmi: f64) -> SatelliteEvidence {
    evidence_with_avg(ndmi, -0.05)
}

pub fn evidence_with_avg(ndmi: f64, ndmi_14day_avg: f64) -> SatelliteEvidence {
    SatelliteEvidence {
        ndmi,
        ndmi_14day_avg,
        observed_at: date(2025, 3, 9),
        cloud_cover_pct: 5.0,
    }
}

/// Fresh pending claim for the Nairobi test farm.
pub fn claim(condition: CropCondition, confidence: f64) -> Claim {
    Claim::new(
        "+254712345678".to_string(),
        nairobi(),
        observation(condition, confidence),
    )
}

/// Pending claim pinned to a submission date, for seasonality and
/// cache-fingerprint scenarios.
pub fn claim_on(condition: CropCondition, confidence: f64, created_at: DateTime<Utc>) -> Claim {
    let mut c = claim(condition, confidence);
    c.created_at = created_at;
    c.updated_at = created_at;
    c
}

pub fn scene(id: &str, observed_at: DateTime<Utc>, cloud_cover_pct: f64) -> SceneMeta {
    SceneMeta {
        id: id.to_string(),
        observed_at,
        cloud_cover_pct,
    }
}

pub fn sample(nir_narrow: f64, swir: f64) -> BandSample {
    BandSample { nir_narrow, swir }
}
