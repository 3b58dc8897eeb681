// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! CLI module for annotating frames.
//!
//! This module contains the command-line interface logic, including argument parsing,
//! logging macros and the `annotate` command implementation.

// Modules
/// CLI arguments.
pub mod args;

/// Annotation command.
pub mod annotate;

/// Logging macros and verbosity control.
pub mod logging;
