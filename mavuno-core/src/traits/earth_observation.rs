use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::EvidenceError;
use crate::models::GeoPoint;

/// Query window for candidate scenes over a point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneQuery {
    pub point: GeoPoint,
    /// Inclusive start of the acquisition window.
    pub start: NaiveDate,
    /// Inclusive end of the acquisition window.
    pub end: NaiveDate,
    /// Only scenes strictly below this cloud cover qualify.
    pub max_cloud_cover_pct: f64,
}

/// Metadata for one candidate satellite scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneMeta {
    pub id: String,
    pub observed_at: DateTime<Utc>,
    pub cloud_cover_pct: f64,
}

/// Mean reflectance of the moisture-sensitive band pair (NIR-narrow and
/// SWIR) averaged over a sample region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandSample {
    pub nir_narrow: f64,
    pub swir: f64,
}

/// Remote earth-observation query seam.
///
/// Implementations are opaque to the pipeline: they return scene metadata
/// and averaged band values; all index math happens in the evidence client.
pub trait EarthObservationProvider: Send + Sync {
    /// Scenes covering the query point within the window, already filtered
    /// by the query's cloud-cover bound. Order is unspecified.
    fn scenes(&self, query: &SceneQuery) -> Result<Vec<SceneMeta>, EvidenceError>;

    /// Sample the band pair averaged over a buffer around `point` at the
    /// given resolution. `None` when the region has no valid pixels.
    fn sample_bands(
        &self,
        scene_id: &str,
        point: GeoPoint,
        buffer_m: f64,
        scale_m: f64,
    ) -> Result<Option<BandSample>, EvidenceError>;
}

impl<T: EarthObservationProvider + ?Sized> EarthObservationProvider for std::sync::Arc<T> {
    fn scenes(&self, query: &SceneQuery) -> Result<Vec<SceneMeta>, EvidenceError> {
        (**self).scenes(query)
    }

    fn sample_bands(
        &self,
        scene_id: &str,
        point: GeoPoint,
        buffer_m: f64,
        scale_m: f64,
    ) -> Result<Option<BandSample>, EvidenceError> {
        (**self).sample_bands(scene_id, point, buffer_m, scale_m)
    }
}
