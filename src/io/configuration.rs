//! Layout constants and runtime configuration defaults

use crate::io::error::{Result, invalid_parameter};

// Canvas settings
/// Default canvas width in pixels
pub const DEFAULT_CANVAS_WIDTH: i32 = 7500;
/// Default canvas height in pixels
pub const DEFAULT_CANVAS_HEIGHT: i32 = 7500;

// Per-image sizing
/// Smallest longest side an image may be scaled to
pub const DEFAULT_MIN_IMAGE_DIM: i32 = 500;
/// Largest longest side an image may be scaled to
pub const DEFAULT_MAX_IMAGE_DIM: i32 = 700;

/// Spacing buffer around each placed image, used for collision tests only
pub const DEFAULT_PADDING: i32 = 12;

// Stops a run once the canvas is judged too full
/// Consecutive collisions that end a run
pub const DEFAULT_FAIL_LIMIT: usize = 10_000;

/// Runs below this coverage percentage are discarded
pub const DEFAULT_MIN_FILL_PCT: f64 = 50.0;

// Reported statistics precision
/// Decimal places kept for the fill percentage
pub const FILL_PCT_DECIMALS: u32 = 4;
/// Decimal places kept for mean placed width and height
pub const AVERAGE_DECIMALS: u32 = 2;

/// File extensions accepted as source images (compared case-insensitively)
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "tif", "tiff"];

// Dataset file settings
/// Global the dataset array is assigned to in the script file
pub const DATASET_VARIABLE: &str = "window.COLLAGE_DATA";
/// Default dataset written by the generator
pub const DEFAULT_DATASET_FILE: &str = "collage_data.js";
/// Default output of the cull command
pub const DEFAULT_FILTERED_FILE: &str = "collage_data_filtered.js";

// Cull defaults
/// Minimum fill percentage kept by the cull command
pub const DEFAULT_CULL_THRESHOLD: f64 = 50.0;
/// Number of top records kept by the cull command (0 keeps all)
pub const DEFAULT_CULL_TOP_N: usize = 1000;

/// Pause between generator runs in milliseconds
pub const DEFAULT_PAUSE_MS: u64 = 0;

/// Immutable layout parameters shared by the engine and the session driver
///
/// Validated once with [`LayoutConfig::validate`] before any run starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutConfig {
    /// Canvas width in pixels
    pub canvas_width: i32,
    /// Canvas height in pixels
    pub canvas_height: i32,
    /// Smallest target longest side
    pub min_dim: i32,
    /// Largest target longest side
    pub max_dim: i32,
    /// Collision buffer around each image
    pub padding: i32,
    /// Consecutive collisions that end a run
    pub fail_limit: usize,
    /// Minimum fill percentage for a run to be kept
    pub min_fill_pct: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            min_dim: DEFAULT_MIN_IMAGE_DIM,
            max_dim: DEFAULT_MAX_IMAGE_DIM,
            padding: DEFAULT_PADDING,
            fail_limit: DEFAULT_FAIL_LIMIT,
            min_fill_pct: DEFAULT_MIN_FILL_PCT,
        }
    }
}

impl LayoutConfig {
    /// Largest longest side that still leaves room for padding on the canvas
    ///
    /// Never below 1.
    pub fn canvas_cap(&self) -> i32 {
        let shortest = i64::from(self.canvas_width.min(self.canvas_height));
        let cap = shortest - 2 * i64::from(self.padding);
        i32::try_from(cap.max(1)).unwrap_or(i32::MAX)
    }

    /// Inclusive range the target longest side is drawn from
    pub fn target_range(&self) -> (i32, i32) {
        let low = self.min_dim.max(1);
        let high = self.max_dim.min(self.canvas_cap()).max(1);
        (low, high.max(low))
    }

    /// Check every parameter before the first run
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A canvas dimension is not positive
    /// - `min_dim` is not positive or exceeds `max_dim`
    /// - `min_dim` exceeds the canvas cap left after padding
    /// - `padding` is negative
    /// - `fail_limit` is zero
    /// - `min_fill_pct` is not a percentage
    pub fn validate(&self) -> Result<()> {
        if self.canvas_width <= 0 {
            return Err(invalid_parameter(
                "canvas_width",
                &self.canvas_width,
                &"must be positive",
            ));
        }
        if self.canvas_height <= 0 {
            return Err(invalid_parameter(
                "canvas_height",
                &self.canvas_height,
                &"must be positive",
            ));
        }
        if self.min_dim <= 0 {
            return Err(invalid_parameter(
                "min_dim",
                &self.min_dim,
                &"must be positive",
            ));
        }
        if self.min_dim > self.max_dim {
            return Err(invalid_parameter(
                "min_dim",
                &self.min_dim,
                &format!("cannot be greater than max_dim ({})", self.max_dim),
            ));
        }
        if self.padding < 0 {
            return Err(invalid_parameter(
                "padding",
                &self.padding,
                &"must not be negative",
            ));
        }
        if self.min_dim > self.canvas_cap() {
            return Err(invalid_parameter(
                "min_dim",
                &self.min_dim,
                &format!(
                    "exceeds the largest side that fits the padded canvas ({})",
                    self.canvas_cap()
                ),
            ));
        }
        if self.fail_limit == 0 {
            return Err(invalid_parameter(
                "fail_limit",
                &self.fail_limit,
                &"must be positive",
            ));
        }
        if !(0.0..=100.0).contains(&self.min_fill_pct) {
            return Err(invalid_parameter(
                "min_fill_pct",
                &self.min_fill_pct,
                &"must be a percentage between 0 and 100",
            ));
        }
        Ok(())
    }
}
