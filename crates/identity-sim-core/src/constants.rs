/// Post-stimulus energy at or above which an agent becomes a fronting candidate.
pub const FRONT_THRESHOLD: f64 = 0.7;

/// Scales how strongly a winner's energy suppresses its peers.
pub const INHIBITION_RATE: f64 = 0.3;

/// Energy added per unit of field intensity to every agent each tick.
pub const KERNEL_BOOST: f64 = 0.05;

/// Uniform per-tick energy loss, floored at zero.
pub const ENERGY_DECAY: f64 = 0.05;

/// Weight used when a role has no entry for a stimulus kind.
pub const DEFAULT_SENSITIVITY: f64 = 0.1;

/// Baseline intensity of the global modulating field.
pub const DEFAULT_FIELD_INTENSITY: f64 = 0.6;

pub const DEFAULT_TICKS: i64 = 50;

pub const DEFAULT_SEED: u64 = 42;
