//! Pure rectangle geometry used by the placement engine
//!
//! This module contains the stateless building blocks of a layout:
//! - Axis-aligned rectangles and the strict overlap test
//! - Padding expansion with canvas clamping
//! - Aspect-preserving scaling to a target longest side

/// Axis-aligned rectangles, overlap testing and padded clamping
pub mod rect;
/// Aspect-preserving image scaling
pub mod scaling;

pub use rect::{Rect, clamp_padded, overlap};
pub use scaling::scale_to_longest;
