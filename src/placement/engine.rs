use crate::geometry::{Rect, clamp_padded, overlap, scale_to_longest};
use crate::io::configuration::LayoutConfig;
use crate::io::error::{CollageError, Result};
use crate::io::image::DimensionProbe;
use crate::placement::random::RandomSelector;
use crate::placement::summary::{Placement, RunDiagnostics, RunResult};
use std::path::{Path, PathBuf};

/// Why a run stopped placing images
///
/// Both variants are normal completions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// Every image was either placed or disqualified
    PoolExhausted,
    /// Too many consecutive trials collided with placed images
    FailLimitReached,
}

/// Why an image was permanently removed from the current run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Disqualification {
    /// The image dimensions could not be read
    Unreadable,
    /// The scaled image does not fit on the canvas
    Oversized {
        /// Scaled width
        width: i32,
        /// Scaled height
        height: i32,
    },
}

/// Result of a single trial of the placement loop
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The image was accepted at the given unpadded rectangle
    Placed {
        /// Image identifier
        id: String,
        /// Unpadded placement
        rect: Rect,
    },
    /// The padded candidate hit an already placed image; the image stays in the pool
    Collided,
    /// The image was removed from the pool without counting as a failure
    Disqualified {
        /// Image identifier
        id: String,
        /// Why it was removed
        reason: Disqualification,
    },
    /// The loop has stopped; further steps return the same outcome
    Finished(Termination),
}

/// A not-yet-placed source image
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    /// Identifier recorded in the layout (the file name)
    pub id: String,
    /// Location passed to the dimension probe
    pub path: PathBuf,
}

impl Candidate {
    /// Build a candidate whose identifier is the file name of `path`
    pub fn from_path(path: &Path) -> Self {
        let id = path.file_name().map_or_else(
            || path.to_string_lossy().into_owned(),
            |name| name.to_string_lossy().into_owned(),
        );
        Self {
            id,
            path: path.to_path_buf(),
        }
    }
}

/// State of one placement run
///
/// Owns the remaining pool, the accepted placements and the run of
/// consecutive collisions exclusively. The loop stops when the pool is empty
/// or `consecutive_failures` reaches the configured fail limit.
pub struct PlacementEngine<'a, P: DimensionProbe + ?Sized> {
    config: &'a LayoutConfig,
    probe: &'a P,
    remaining: Vec<Candidate>,
    placed: Vec<Placement>,
    /// Padded rectangles of `placed`, index-aligned
    placed_padded: Vec<Rect>,
    consecutive_failures: usize,
    attempts: usize,
    collisions: usize,
    disqualified: usize,
}

impl<'a, P: DimensionProbe + ?Sized> PlacementEngine<'a, P> {
    /// Start a run over the given image paths
    ///
    /// # Errors
    ///
    /// Returns [`CollageError::EmptyPool`] if `paths` is empty
    pub fn new(config: &'a LayoutConfig, probe: &'a P, paths: &[PathBuf]) -> Result<Self> {
        if paths.is_empty() {
            return Err(CollageError::EmptyPool {
                reason: "candidate pool is empty".to_string(),
            });
        }

        Ok(Self {
            config,
            probe,
            remaining: paths.iter().map(|p| Candidate::from_path(p)).collect(),
            placed: Vec::with_capacity(paths.len()),
            placed_padded: Vec::with_capacity(paths.len()),
            consecutive_failures: 0,
            attempts: 0,
            collisions: 0,
            disqualified: 0,
        })
    }

    /// Images still waiting to be placed
    pub fn remaining(&self) -> &[Candidate] {
        &self.remaining
    }

    /// Placements accepted so far
    pub fn placed(&self) -> &[Placement] {
        &self.placed
    }

    /// Current run of consecutive collisions
    pub const fn consecutive_failures(&self) -> usize {
        self.consecutive_failures
    }

    /// Collision run length at which the loop stops
    pub const fn fail_limit(&self) -> usize {
        self.config.fail_limit
    }

    /// Stop reason, or `None` while the loop should continue
    pub fn termination(&self) -> Option<Termination> {
        if self.remaining.is_empty() {
            Some(Termination::PoolExhausted)
        } else if self.consecutive_failures >= self.config.fail_limit {
            Some(Termination::FailLimitReached)
        } else {
            None
        }
    }

    /// Run a single trial of the loop
    pub fn step(&mut self, rng: &mut RandomSelector) -> StepOutcome {
        if let Some(termination) = self.termination() {
            return StepOutcome::Finished(termination);
        }
        let Some(index) = rng.pick_index(self.remaining.len()) else {
            return StepOutcome::Finished(Termination::PoolExhausted);
        };

        let probed = match self.remaining.get(index) {
            Some(candidate) => self.probe.probe_dimensions(&candidate.path),
            None => return StepOutcome::Finished(Termination::PoolExhausted),
        };
        let (source_width, source_height) = match probed {
            Ok(dimensions) => dimensions,
            Err(error) => {
                tracing::debug!("Disqualifying unreadable image: {error}");
                return self.disqualify(index, Disqualification::Unreadable);
            }
        };
        // Dimensions beyond i32 can never fit the canvas
        let (Ok(source_width), Ok(source_height)) =
            (i32::try_from(source_width), i32::try_from(source_height))
        else {
            return self.disqualify(
                index,
                Disqualification::Oversized {
                    width: i32::MAX,
                    height: i32::MAX,
                },
            );
        };

        let (low, high) = self.config.target_range();
        let target = rng.inclusive(low, high);
        let (width, height) = scale_to_longest(source_width, source_height, target);
        if width > self.config.canvas_width || height > self.config.canvas_height {
            return self.disqualify(index, Disqualification::Oversized { width, height });
        }

        let x = rng.inclusive(0, self.config.canvas_width - width);
        let y = rng.inclusive(0, self.config.canvas_height - height);
        let rect = Rect::new(x, y, width, height);
        let padded = clamp_padded(
            &rect,
            self.config.padding,
            self.config.canvas_width,
            self.config.canvas_height,
        );

        self.attempts += 1;
        if self
            .placed_padded
            .iter()
            .any(|existing| overlap(&padded, existing))
        {
            self.consecutive_failures += 1;
            self.collisions += 1;
            return StepOutcome::Collided;
        }

        let candidate = self.remaining.swap_remove(index);
        self.placed.push(Placement {
            id: candidate.id.clone(),
            rect,
        });
        self.placed_padded.push(padded);
        self.consecutive_failures = 0;

        StepOutcome::Placed {
            id: candidate.id,
            rect,
        }
    }

    /// Loop until a stop condition fires and summarize the run
    pub fn run(mut self, rng: &mut RandomSelector) -> RunResult {
        let termination = loop {
            if let StepOutcome::Finished(termination) = self.step(rng) {
                break termination;
            }
        };

        let diagnostics = RunDiagnostics {
            attempts: self.attempts,
            collisions: self.collisions,
            disqualified: self.disqualified,
            termination,
        };
        tracing::debug!(
            placed = self.placed.len(),
            attempts = diagnostics.attempts,
            disqualified = diagnostics.disqualified,
            ?termination,
            "Run finished"
        );

        RunResult::summarize(
            self.placed,
            self.config.canvas_width,
            self.config.canvas_height,
            diagnostics,
        )
    }

    fn disqualify(&mut self, index: usize, reason: Disqualification) -> StepOutcome {
        let candidate = self.remaining.swap_remove(index);
        self.disqualified += 1;
        tracing::debug!(id = %candidate.id, ?reason, "Image disqualified");
        StepOutcome::Disqualified {
            id: candidate.id,
            reason,
        }
    }
}
