//! Command-line interface for layout generation and dataset culling

use crate::dataset::{DatasetStore, ScriptFileStore, cull};
use crate::io::configuration::{
    DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_CULL_THRESHOLD, DEFAULT_CULL_TOP_N,
    DEFAULT_DATASET_FILE, DEFAULT_FAIL_LIMIT, DEFAULT_FILTERED_FILE, DEFAULT_MAX_IMAGE_DIM,
    DEFAULT_MIN_FILL_PCT, DEFAULT_MIN_IMAGE_DIM, DEFAULT_PADDING, DEFAULT_PAUSE_MS,
    IMAGE_EXTENSIONS, LayoutConfig,
};
use crate::io::error::Result;
use crate::io::image::ImageProbe;
use crate::io::progress::ProgressManager;
use crate::placement::RandomSelector;
use crate::session::SessionDriver;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "collagen")]
#[command(
    author,
    version,
    about = "Generate random non-overlapping collage layouts and rank them by coverage"
)]
/// Command-line arguments for the collage layout tool
pub struct Cli {
    /// Operation to perform
    #[command(subcommand)]
    pub command: Command,

    /// Suppress progress output and all logs except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log every run and disqualified image
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Generate layouts in a loop and merge the good ones into the dataset
    Generate(GenerateArgs),
    /// Filter an existing dataset by fill threshold and keep the top entries
    Cull(CullArgs),
}

/// Arguments of the `generate` subcommand
#[derive(Args)]
pub struct GenerateArgs {
    /// Directory containing the source images
    #[arg(value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Dataset script file to merge accepted layouts into
    #[arg(short, long, default_value = DEFAULT_DATASET_FILE)]
    pub output: PathBuf,

    /// Canvas width in pixels
    #[arg(short = 'W', long, default_value_t = DEFAULT_CANVAS_WIDTH)]
    pub width: i32,

    /// Canvas height in pixels
    #[arg(short = 'H', long, default_value_t = DEFAULT_CANVAS_HEIGHT)]
    pub height: i32,

    /// Smallest longest side an image is scaled to
    #[arg(long, default_value_t = DEFAULT_MIN_IMAGE_DIM)]
    pub min_dim: i32,

    /// Largest longest side an image is scaled to
    #[arg(long, default_value_t = DEFAULT_MAX_IMAGE_DIM)]
    pub max_dim: i32,

    /// Collision buffer around each image in pixels
    #[arg(short, long, default_value_t = DEFAULT_PADDING)]
    pub padding: i32,

    /// Consecutive collisions that end a run
    #[arg(short, long, default_value_t = DEFAULT_FAIL_LIMIT)]
    pub fail_limit: usize,

    /// Discard runs whose fill percentage is below this value
    #[arg(short, long, default_value_t = DEFAULT_MIN_FILL_PCT)]
    pub min_fill: f64,

    /// Stop after this many runs instead of looping until interrupted
    #[arg(short, long)]
    pub runs: Option<usize>,

    /// Random seed for reproducible sessions
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Pause between runs in milliseconds
    #[arg(long, default_value_t = DEFAULT_PAUSE_MS)]
    pub pause_ms: u64,

    /// Accepted image extension, repeatable (defaults to common image formats)
    #[arg(short, long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,
}

impl GenerateArgs {
    /// Layout parameters built from the flags
    pub const fn layout_config(&self) -> LayoutConfig {
        LayoutConfig {
            canvas_width: self.width,
            canvas_height: self.height,
            min_dim: self.min_dim,
            max_dim: self.max_dim,
            padding: self.padding,
            fail_limit: self.fail_limit,
            min_fill_pct: self.min_fill,
        }
    }

    /// Requested extensions, or the default image set when none were given
    pub fn extensions(&self) -> Vec<String> {
        if self.extensions.is_empty() {
            IMAGE_EXTENSIONS.iter().map(ToString::to_string).collect()
        } else {
            self.extensions.clone()
        }
    }
}

/// Arguments of the `cull` subcommand
#[derive(Args)]
pub struct CullArgs {
    /// Dataset script file to read
    #[arg(value_name = "INPUT", default_value = DEFAULT_DATASET_FILE)]
    pub input: PathBuf,

    /// Where to write the filtered dataset
    #[arg(short, long, default_value = DEFAULT_FILTERED_FILE)]
    pub output: PathBuf,

    /// Keep records whose fill percentage is at least this value
    #[arg(short, long, default_value_t = DEFAULT_CULL_THRESHOLD)]
    pub threshold: f64,

    /// Keep only the best N records (0 keeps all)
    #[arg(short = 'n', long, default_value_t = DEFAULT_CULL_TOP_N)]
    pub top: usize,
}

/// Dispatches parsed command-line arguments
pub struct CommandProcessor {
    cli: Cli,
}

impl CommandProcessor {
    /// Create a processor for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the selected subcommand
    ///
    /// # Errors
    ///
    /// Returns an error if configuration validation, listing, probing or
    /// dataset persistence fails
    pub fn process(&self) -> Result<()> {
        match &self.cli.command {
            Command::Generate(args) => self.generate(args),
            Command::Cull(args) => self.cull(args),
        }
    }

    // Allow print for the end-of-session report
    #[allow(clippy::print_stderr)]
    fn generate(&self, args: &GenerateArgs) -> Result<()> {
        let rng = args
            .seed
            .map_or_else(RandomSelector::from_entropy, RandomSelector::new);
        let mut driver = SessionDriver::new(
            args.layout_config(),
            &args.input_dir,
            args.extensions(),
            ImageProbe,
            ScriptFileStore::new(&args.output),
            rng,
        )?
        .with_pause(Duration::from_millis(args.pause_ms));

        let mut progress = self
            .cli
            .should_show_progress()
            .then(|| ProgressManager::new(args.runs));

        let result = driver.run(args.runs, |outcome| {
            if let Some(ref mut pm) = progress {
                pm.record(outcome);
            }
        });

        if let Some(ref pm) = progress {
            pm.finish();
        }

        let summary = result?;
        if !self.cli.quiet {
            eprintln!(
                "Runs: {} (kept {}, skipped {}) -> {}",
                summary.runs,
                summary.accepted,
                summary.rejected,
                args.output.display()
            );
        }
        Ok(())
    }

    // Allow print for user feedback on the filtered dataset
    #[allow(clippy::print_stderr)]
    fn cull(&self, args: &CullArgs) -> Result<()> {
        let records = ScriptFileStore::new(&args.input).try_load()?;
        let original = records.len();
        let kept = cull(records, args.threshold, Some(args.top));

        ScriptFileStore::new(&args.output).save(&kept)?;

        if !self.cli.quiet {
            eprintln!("Threshold: {}%", args.threshold);
            eprintln!("Original entries: {original}, kept: {}", kept.len());
            if args.top > 0 {
                eprintln!("Applied top-N cap: {}", args.top);
            }
            eprintln!("Wrote: {}", args.output.display());
        }
        Ok(())
    }
}
