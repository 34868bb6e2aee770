//! Run progress display for long generator sessions

use crate::session::driver::RunOutcome;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;
use std::time::Duration;

/// Spinner refresh interval
const TICK_INTERVAL: Duration = Duration::from_millis(120);

static SPINNER_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_spinner()
        .template("{spinner} [{elapsed_precise}] runs {pos} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
});

static BOUNDED_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Runs: [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

/// Tracks accepted runs and the best coverage seen during a session
///
/// Uses a bar when the number of runs is known and a spinner otherwise.
pub struct ProgressManager {
    bar: ProgressBar,
    accepted: usize,
    rejected: usize,
    best_fill_pct: Option<f64>,
}

impl ProgressManager {
    /// Create a progress display for `total_runs` runs, unbounded when `None`
    pub fn new(total_runs: Option<usize>) -> Self {
        let bar = match total_runs {
            Some(total) => {
                let bar = ProgressBar::new(total as u64);
                bar.set_style(BOUNDED_STYLE.clone());
                bar
            }
            None => {
                let bar = ProgressBar::new_spinner();
                bar.set_style(SPINNER_STYLE.clone());
                bar.enable_steady_tick(TICK_INTERVAL);
                bar
            }
        };

        Self {
            bar,
            accepted: 0,
            rejected: 0,
            best_fill_pct: None,
        }
    }

    /// Record a finished run
    pub fn record(&mut self, outcome: &RunOutcome) {
        match outcome {
            RunOutcome::Accepted { .. } => self.accepted += 1,
            RunOutcome::Rejected { .. } => self.rejected += 1,
        }
        let fill_pct = outcome.fill_pct();
        self.best_fill_pct = Some(self.best_fill_pct.map_or(fill_pct, |best| best.max(fill_pct)));

        self.bar.inc(1);
        self.bar.set_message(self.message());
    }

    /// Runs kept so far
    pub const fn accepted(&self) -> usize {
        self.accepted
    }

    /// Runs discarded so far
    pub const fn rejected(&self) -> usize {
        self.rejected
    }

    /// Status line shown next to the bar
    pub fn message(&self) -> String {
        let best = self
            .best_fill_pct
            .map_or_else(|| "-".to_string(), |best| format!("{best:.2}%"));
        format!(
            "kept {} / skipped {} / best {best}",
            self.accepted, self.rejected
        )
    }

    /// Clear the display
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
