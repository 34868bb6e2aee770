//! Random non-overlapping collage layout generation
//!
//! Images from a directory are scaled to a random size and dropped at random
//! positions on a fixed canvas until the pool runs out or too many consecutive
//! trials collide. Each finished layout is scored by how much of the canvas it
//! covers, and good layouts are merged into a ranked dataset file.

#![forbid(unsafe_code)]

/// Persisted layout records, ranking and the dataset file
pub mod dataset;
/// Rectangle overlap, padding and scaling primitives
pub mod geometry;
/// Input/output operations, configuration and error handling
pub mod io;
/// Single-run placement engine and run statistics
pub mod placement;
/// Repeated runs feeding the dataset
pub mod session;

pub use io::error::{CollageError, Result};
