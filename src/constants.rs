use std::time::Duration;

pub const OUTCOME_TX_ERR: &str = "Grading outcome channel closed unexpectedly";
pub const HINT_TX_ERR: &str = "Hint outcome channel closed unexpectedly";

/// Size of the simulated test suite the engine is asked to run against.
pub const SIMULATED_SUITE_SIZE: u32 = 3;

pub const GRADING_TIMEOUT: Duration = Duration::from_secs(30);
pub const HINT_TIMEOUT: Duration = Duration::from_secs(15);

pub const NO_HINT_FALLBACK: &str = "No hint available.";
pub const HINT_FAULT_FALLBACK: &str = "Could not generate hint at this time.";
