//! Coverage and size statistics for a finished run

use crate::geometry::Rect;
use crate::io::configuration::{AVERAGE_DECIMALS, FILL_PCT_DECIMALS};
use crate::placement::engine::Termination;
use std::collections::BTreeMap;

/// An accepted image and its unpadded rectangle on the canvas
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    /// Image identifier (the source file name)
    pub id: String,
    /// Final unpadded placement
    pub rect: Rect,
}

/// Counters collected while a run was in progress
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunDiagnostics {
    /// Number of trials that reached the collision test
    pub attempts: usize,
    /// Trials rejected because of a collision
    pub collisions: usize,
    /// Images removed from the pool without being placed
    pub disqualified: usize,
    /// Why the loop stopped
    pub termination: Termination,
}

/// Immutable outcome of one placement run
///
/// Carries no rank: ranks only exist once a run is merged into a dataset.
#[derive(Clone, Debug, PartialEq)]
pub struct RunResult {
    fill_pct: f64,
    avg_w: f64,
    avg_h: f64,
    placements: Vec<Placement>,
    diagnostics: RunDiagnostics,
}

impl RunResult {
    /// Summarize accepted placements against the canvas they were placed on
    pub fn summarize(
        placements: Vec<Placement>,
        canvas_width: i32,
        canvas_height: i32,
        diagnostics: RunDiagnostics,
    ) -> Self {
        let rects: Vec<Rect> = placements.iter().map(|p| p.rect).collect();
        let fill_pct = round_to(
            fill_percentage(&rects, canvas_width, canvas_height),
            FILL_PCT_DECIMALS,
        );
        let (avg_w, avg_h) = mean_dimensions(&rects);

        Self {
            fill_pct,
            avg_w: round_to(avg_w, AVERAGE_DECIMALS),
            avg_h: round_to(avg_h, AVERAGE_DECIMALS),
            placements,
            diagnostics,
        }
    }

    /// Percentage of the canvas covered by unpadded images
    pub const fn fill_pct(&self) -> f64 {
        self.fill_pct
    }

    /// Mean placed width
    pub const fn avg_w(&self) -> f64 {
        self.avg_w
    }

    /// Mean placed height
    pub const fn avg_h(&self) -> f64 {
        self.avg_h
    }

    /// Accepted placements in acceptance order
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Counters and stop reason of the run
    pub const fn diagnostics(&self) -> RunDiagnostics {
        self.diagnostics
    }

    /// Placements keyed by image identifier
    ///
    /// Identifiers are unique within a run since each candidate leaves the
    /// pool once placed.
    pub fn image_data(&self) -> BTreeMap<String, Rect> {
        self.placements
            .iter()
            .map(|p| (p.id.clone(), p.rect))
            .collect()
    }
}

/// Covered area of `rects` as a percentage of the canvas
///
/// Returns 0 for an empty canvas.
pub fn fill_percentage(rects: &[Rect], canvas_width: i32, canvas_height: i32) -> f64 {
    let total = i64::from(canvas_width) * i64::from(canvas_height);
    if total <= 0 {
        return 0.0;
    }
    let covered: u64 = rects.iter().map(Rect::area).sum();
    covered as f64 / total as f64 * 100.0
}

/// Arithmetic mean width and height, `(0, 0)` when there are no rectangles
pub fn mean_dimensions(rects: &[Rect]) -> (f64, f64) {
    if rects.is_empty() {
        return (0.0, 0.0);
    }
    let count = rects.len() as f64;
    let width_sum: f64 = rects.iter().map(|r| f64::from(r.w)).sum();
    let height_sum: f64 = rects.iter().map(|r| f64::from(r.h)).sum();
    (width_sum / count, height_sum / count)
}

/// Round to a fixed number of decimals, sending exact halves to the even digit
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10_f64.powi(decimals as i32);
    (value * scale).round_ties_even() / scale
}
