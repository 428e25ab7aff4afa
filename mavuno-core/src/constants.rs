/// Mavuno pipeline version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Regional dry-harvest months (FEWS NET crop calendar): January and February.
/// Drought claims submitted in these months face the seasonality check.
pub const DRY_HARVEST_MONTHS: [u32; 2] = [1, 2];

/// Maximum number of ranked classifier entries carried on an observation.
pub const MAX_RANKED_CLASSES: usize = 3;

/// Coordinate rounding used for evidence cache fingerprints (decimal places).
/// Four places is roughly 11 m, enough to absorb GPS jitter between
/// repeated submissions from the same plot.
pub const FINGERPRINT_COORD_DECIMALS: u32 = 4;
