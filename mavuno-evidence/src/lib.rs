//! # mavuno-evidence
//!
//! Satellite evidence retrieval for claim adjudication: a TTL cache keyed by
//! rounded location + claim date, and a client that selects the least-cloudy
//! recent scene, derives the moisture index from its band values, and
//! computes a 14-day trailing baseline. Remote calls carry bounded retry on
//! transient provider errors.

pub mod cache;
pub mod client;
#[cfg(feature = "remote-provider")]
pub mod remote;

pub use cache::EvidenceCache;
pub use client::SatelliteEvidenceClient;
