//! Input/output concerns around the layout core
//!
//! Command-line parsing, configuration defaults, the error type, image
//! discovery and probing, logging setup and progress display.

/// Command-line interface and subcommand dispatch
pub mod cli;
/// Layout constants and validated configuration
pub mod configuration;
/// Error types
pub mod error;
/// Image listing and dimension probing
pub mod image;
/// Tracing subscriber setup
pub mod logging;
/// Run progress display
pub mod progress;
