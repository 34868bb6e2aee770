//! CLI entry point for the collage layout generator

use clap::Parser;
use collagen::io::cli::{Cli, CommandProcessor};
use collagen::io::logging::{init_logging, log_level};

fn main() -> collagen::Result<()> {
    let cli = Cli::parse();
    init_logging(log_level(cli.quiet, cli.verbose));
    let processor = CommandProcessor::new(cli);
    processor.process()
}
