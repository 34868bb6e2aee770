//! Stochastic placement of images onto a fixed canvas
//!
//! One [`engine::PlacementEngine`] owns the state of a single run: the pool of
//! images not yet placed, the rectangles accepted so far and the run of
//! consecutive collisions. Runs never share state.

/// Pick, scale, position and collision loop for a single run
pub mod engine;
/// Seeded random source for reproducible runs
pub mod random;
/// Run statistics and the immutable run result
pub mod summary;

pub use engine::{Candidate, Disqualification, PlacementEngine, StepOutcome, Termination};
pub use random::RandomSelector;
pub use summary::{Placement, RunDiagnostics, RunResult};
