mod claim;
mod confidence;
mod decision;
mod geo;
mod ground;
mod payment;
mod satellite;

pub use claim::{Claim, ClaimStatus, PayoutRecord, PayoutStatus};
pub use confidence::Confidence;
pub use decision::{AppliedRule, DecisionStatus, VerificationDecision};
pub use geo::GeoPoint;
pub use ground::{CropCondition, GroundObservation, RankedCondition};
pub use payment::{AttemptOutcome, PaymentAttempt};
pub use satellite::{MoistureVerdict, SatelliteEvidence};
