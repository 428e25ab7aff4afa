//! HTTP-backed earth-observation provider (feature `remote-provider`).
//!
//! Talks to the imagery gateway's JSON API. Network and 5xx failures are
//! transient; 4xx responses are permanent (malformed query or auth).

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::time::Duration;

use mavuno_core::errors::EvidenceError;
use mavuno_core::models::GeoPoint;
use mavuno_core::traits::{BandSample, EarthObservationProvider, SceneMeta, SceneQuery};

/// Connection settings for the imagery gateway.
#[derive(Debug, Clone)]
pub struct RemoteProviderConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

/// `EarthObservationProvider` over HTTP.
pub struct HttpEarthObservationProvider {
    http: reqwest::blocking::Client,
    config: RemoteProviderConfig,
}

#[derive(Debug, Deserialize)]
struct SceneDto {
    id: String,
    observed_at: DateTime<Utc>,
    cloud_cover_pct: f64,
}

#[derive(Debug, Deserialize)]
struct SceneListDto {
    scenes: Vec<SceneDto>,
}

#[derive(Debug, Deserialize)]
struct BandSampleDto {
    nir_narrow: Option<f64>,
    swir: Option<f64>,
}

impl HttpEarthObservationProvider {
    pub fn new(config: RemoteProviderConfig) -> Result<Self, EvidenceError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| EvidenceError::Provider {
                reason: format!("failed to build HTTP client: {e}"),
                transient: false,
            })?;
        Ok(Self { http, config })
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, EvidenceError> {
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.config.api_key)
            .send()
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(EvidenceError::Provider {
                reason: format!("gateway returned {status} for {url}"),
                transient: status.is_server_error(),
            });
        }

        response.json::<T>().map_err(|e| EvidenceError::Provider {
            reason: format!("malformed gateway response: {e}"),
            transient: false,
        })
    }
}

fn transport_error(e: reqwest::Error) -> EvidenceError {
    EvidenceError::Provider {
        reason: format!("gateway request failed: {e}"),
        // Timeouts and connection drops may clear up on a later attempt.
        transient: e.is_timeout() || e.is_connect() || e.is_request(),
    }
}

impl EarthObservationProvider for HttpEarthObservationProvider {
    fn scenes(&self, query: &SceneQuery) -> Result<Vec<SceneMeta>, EvidenceError> {
        let url = format!(
            "{}/v1/scenes?lat={}&lng={}&start={}&end={}&max_cloud_cover_pct={}",
            self.config.base_url,
            query.point.lat,
            query.point.lng,
            query.start,
            query.end,
            query.max_cloud_cover_pct,
        );
        let list: SceneListDto = self.get_json(&url)?;
        Ok(list
            .scenes
            .into_iter()
            .map(|s| SceneMeta {
                id: s.id,
                observed_at: s.observed_at,
                cloud_cover_pct: s.cloud_cover_pct,
            })
            .collect())
    }

    fn sample_bands(
        &self,
        scene_id: &str,
        point: GeoPoint,
        buffer_m: f64,
        scale_m: f64,
    ) -> Result<Option<BandSample>, EvidenceError> {
        let url = format!(
            "{}/v1/scenes/{}/bands?lat={}&lng={}&buffer_m={}&scale_m={}",
            self.config.base_url, scene_id, point.lat, point.lng, buffer_m, scale_m,
        );
        let dto: BandSampleDto = self.get_json(&url)?;
        Ok(match (dto.nir_narrow, dto.swir) {
            (Some(nir_narrow), Some(swir)) => Some(BandSample { nir_narrow, swir }),
            // Fully clouded or masked region: no valid pixels.
            _ => None,
        })
    }
}
