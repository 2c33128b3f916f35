//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the vasari binary.

mod commands;
mod posts;

pub use commands::Cli;
pub use posts::run;
