//! Command-line interface for skywatch.
//!
//! This module provides the CLI structure for the `skywatch` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ChartCommand, CheckCommand, ConfigCommand, FilterArgs, MapCommand, RenderCommand,
    ShapesCommand,
};

/// skywatch - Sighting trends and anomaly mapping
///
/// Queries a local database of reported sightings and builds the trend
/// correlation chart and the sighting map for a chosen filter.
#[derive(Debug, Parser)]
#[command(name = "skywatch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path to the sightings database (overrides configuration)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub database: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the shapes available for filtering
    Shapes(ShapesCommand),

    /// Print the trend chart specification
    Chart(ChartCommand),

    /// Print the sighting map specification
    Map(MapCommand),

    /// Run a full render pass and write the dashboard page
    Render(RenderCommand),

    /// Check that the database has the expected tables and columns
    Check(CheckCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
