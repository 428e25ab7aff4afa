//! # mavuno-verify
//!
//! The verification engine: a pure, deterministic function from
//! (ground observation, satellite evidence, claim date) to a decision with
//! a mandatory explanation trail. Contextual rules run first in a fixed
//! order, then the seasonality check, then the weighted-score fallback.
//! No I/O, no mutable state.

mod engine;
mod explanation;

pub use engine::{satellite_confidence, VerificationEngine};
