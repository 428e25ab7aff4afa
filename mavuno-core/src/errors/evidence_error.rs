use chrono::NaiveDate;

use crate::retry::Transient;

/// Satellite evidence retrieval errors.
#[derive(Debug, thiserror::Error)]
pub enum EvidenceError {
    #[error(
        "no suitable imagery for ({lat}, {lng}) between {window_start} and {window_end} \
         with cloud cover < {max_cloud_cover_pct}%"
    )]
    NoSuitableImagery {
        lat: f64,
        lng: f64,
        window_start: NaiveDate,
        window_end: NaiveDate,
        max_cloud_cover_pct: f64,
    },

    #[error("no valid pixels in sample region for scene {scene_id}")]
    EmptySample { scene_id: String },

    #[error("earth-observation provider error: {reason}")]
    Provider { reason: String, transient: bool },
}

impl Transient for EvidenceError {
    fn is_transient(&self) -> bool {
        matches!(self, Self::Provider { transient: true, .. })
    }
}
