use crate::dataset::{DatasetStore, Record, merge_run};
use crate::io::configuration::LayoutConfig;
use crate::io::error::{CollageError, Result};
use crate::io::image::{DimensionProbe, list_candidates};
use crate::placement::{PlacementEngine, RandomSelector, RunResult};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Phase of the session driver
///
/// `Idle -> Generating -> (Rejected -> Idle) | (Accepted -> Persisting -> Idle)`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    /// Waiting for the next run
    Idle,
    /// A placement run is in progress
    Generating,
    /// The last run fell below the fill threshold
    Rejected,
    /// The last run passed the fill threshold
    Accepted,
    /// The merged dataset is being written
    Persisting,
}

/// What happened to one run
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RunOutcome {
    /// Discarded because its fill was below the threshold
    Rejected {
        /// Fill percentage of the run
        fill_pct: f64,
        /// Number of images placed
        placed: usize,
    },
    /// Merged into the dataset
    Accepted {
        /// Fill percentage of the run
        fill_pct: f64,
        /// Number of images placed
        placed: usize,
        /// Rank the run received
        rank: usize,
        /// Dataset size after the merge
        total: usize,
    },
}

impl RunOutcome {
    /// Fill percentage of the run either way
    pub const fn fill_pct(&self) -> f64 {
        match self {
            Self::Rejected { fill_pct, .. } | Self::Accepted { fill_pct, .. } => *fill_pct,
        }
    }

    /// Whether the run was merged into the dataset
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

/// Totals over a driver session
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SessionSummary {
    /// Completed runs
    pub runs: usize,
    /// Runs merged into the dataset
    pub accepted: usize,
    /// Runs discarded by the threshold
    pub rejected: usize,
    /// Highest fill percentage seen, if any run completed
    pub best_fill_pct: Option<f64>,
}

impl SessionSummary {
    fn record(&mut self, outcome: &RunOutcome) {
        self.runs += 1;
        if outcome.is_accepted() {
            self.accepted += 1;
        } else {
            self.rejected += 1;
        }
        let fill_pct = outcome.fill_pct();
        self.best_fill_pct = Some(self.best_fill_pct.map_or(fill_pct, |best| best.max(fill_pct)));
    }
}

/// Repeats placement runs and merges the good ones into the dataset
///
/// Every run gets a fresh [`PlacementEngine`]; the persisted dataset is the
/// only state shared between runs, and it is read, merged and written back as
/// one step for each accepted run.
pub struct SessionDriver<P: DimensionProbe, S: DatasetStore> {
    config: LayoutConfig,
    input_dir: PathBuf,
    extensions: Vec<String>,
    probe: P,
    store: S,
    rng: RandomSelector,
    pause: Duration,
    state: DriverState,
}

impl<P: DimensionProbe, S: DatasetStore> SessionDriver<P, S> {
    /// Create a driver after validating the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid
    pub fn new(
        config: LayoutConfig,
        input_dir: impl Into<PathBuf>,
        extensions: Vec<String>,
        probe: P,
        store: S,
        rng: RandomSelector,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            input_dir: input_dir.into(),
            extensions,
            probe,
            store,
            rng,
            pause: Duration::ZERO,
            state: DriverState::Idle,
        })
    }

    /// Sleep this long between consecutive runs
    #[must_use]
    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    /// Current phase
    pub const fn state(&self) -> DriverState {
        self.state
    }

    /// Validated layout parameters
    pub const fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Directory the candidates are listed from
    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }

    /// Dataset the driver merges into
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Generate one layout and keep it if it passes the fill threshold
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input directory cannot be listed or holds no candidate images
    /// - The merged dataset cannot be written
    pub fn run_once(&mut self) -> Result<RunOutcome> {
        let outcome = self.generate_and_merge();
        self.state = DriverState::Idle;
        outcome
    }

    /// Repeat runs until `max_runs` have completed, forever when `None`
    ///
    /// `observer` sees every outcome as it happens.
    ///
    /// # Errors
    ///
    /// Stops at the first run that fails; see [`SessionDriver::run_once`]
    pub fn run<F>(&mut self, max_runs: Option<usize>, mut observer: F) -> Result<SessionSummary>
    where
        F: FnMut(&RunOutcome),
    {
        let mut summary = SessionSummary::default();
        while max_runs.is_none_or(|limit| summary.runs < limit) {
            if summary.runs > 0 && !self.pause.is_zero() {
                std::thread::sleep(self.pause);
            }
            let outcome = self.run_once()?;
            observer(&outcome);
            summary.record(&outcome);
        }
        Ok(summary)
    }

    fn generate_and_merge(&mut self) -> Result<RunOutcome> {
        self.state = DriverState::Generating;
        let run = self.generate()?;
        let fill_pct = run.fill_pct();
        let placed = run.placements().len();

        if fill_pct < self.config.min_fill_pct {
            self.state = DriverState::Rejected;
            tracing::info!(
                fill_pct,
                min_fill_pct = self.config.min_fill_pct,
                "Skipping run below fill threshold"
            );
            return Ok(RunOutcome::Rejected { fill_pct, placed });
        }

        self.state = DriverState::Accepted;
        let record = Record::from_run(&run);

        self.state = DriverState::Persisting;
        let existing = self.store.load();
        let rank = existing.iter().filter(|r| r.fill_pct >= fill_pct).count() + 1;
        let merged = merge_run(existing, record);
        self.store.save(&merged)?;

        tracing::info!(fill_pct, rank, total = merged.len(), "Kept run");
        Ok(RunOutcome::Accepted {
            fill_pct,
            placed,
            rank,
            total: merged.len(),
        })
    }

    fn generate(&mut self) -> Result<RunResult> {
        let paths = list_candidates(&self.input_dir, &self.extensions)?;
        if paths.is_empty() {
            return Err(CollageError::EmptyPool {
                reason: format!(
                    "no files with extensions [{}] in '{}'",
                    self.extensions.join(", "),
                    self.input_dir.display()
                ),
            });
        }

        let engine = PlacementEngine::new(&self.config, &self.probe, &paths)?;
        let run = engine.run(&mut self.rng);
        tracing::info!(
            images = paths.len(),
            placed = run.placements().len(),
            fill_pct = run.fill_pct(),
            avg_w = run.avg_w(),
            avg_h = run.avg_h(),
            "Run complete"
        );
        Ok(run)
    }
}
