//! # mavuno-core
//!
//! Foundation crate for the Mavuno claim-adjudication pipeline.
//! Defines domain models, collaborator traits, errors, config, constants,
//! and the retry arithmetic shared by the remote-facing crates.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod retry;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::MavunoConfig;
pub use errors::{MavunoError, MavunoResult};
pub use models::{
    Claim, ClaimStatus, Confidence, CropCondition, GroundObservation, MoistureVerdict,
    SatelliteEvidence, VerificationDecision,
};
