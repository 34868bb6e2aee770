//! Tracing subscriber setup for the command-line tool

use tracing::Level;

/// Pick the log level for the requested verbosity
///
/// Quiet wins over verbose.
pub const fn log_level(quiet: bool, verbose: bool) -> Level {
    if quiet {
        Level::ERROR
    } else if verbose {
        Level::DEBUG
    } else {
        Level::WARN
    }
}

/// Install a stderr formatting subscriber
///
/// Returns `false` if a global subscriber was already installed, which leaves
/// the existing one in place.
pub fn init_logging(level: Level) -> bool {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok()
}
