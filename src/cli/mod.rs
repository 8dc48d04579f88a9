//! CLI module for the sweepcfg tool.
//!
//! This module provides the command-line interface for authoring and
//! checking sweep configuration files.

mod commands;
mod output;

pub use commands::{Cli, Commands, OutputFormat};
pub use output::{OutputFormatter, SweepDiff};
