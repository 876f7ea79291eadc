//! Command-line interface for odolog.
//!
//! This module provides the CLI structure and command handlers for the
//! `odolog` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{AddCommand, ConfigCommand, ShowCommand, StatusCommand};

/// odolog - Record and review vehicle odometer readings
///
/// A small tool that keeps odometer readings in a local `SQLite` database
/// and prints them as a text report.
#[derive(Debug, Parser)]
#[command(name = "odolog")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

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
    /// Show all stored readings
    Show(ShowCommand),

    /// Record a new reading
    Add(AddCommand),

    /// Insert the fixed sample reading and show the report
    Sample,

    /// Delete all readings (not yet implemented)
    Clear,

    /// Show database status
    Status(StatusCommand),

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
