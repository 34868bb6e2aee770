//! Repeated generation sessions that feed the persisted dataset

/// Run loop, threshold filter and dataset merge
pub mod driver;

pub use driver::{DriverState, RunOutcome, SessionDriver, SessionSummary};
