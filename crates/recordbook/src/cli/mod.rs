//! Command-line interface for recordbook.
//!
//! This module provides the CLI structure for the `recbook` binary, a thin
//! consumer of [`crate::Store`].

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    fields_to_record, AddCommand, ConfigCommand, DeleteCommand, Field, FormatArg, ListCommand,
    OutputFormat, ShowCommand, UpdateCommand,
};

use crate::logging::Verbosity;

/// recbook - Keep track of clients, flights and airlines
///
/// Records are stored as flat files, one per record type, and rewritten
/// after every change.
#[derive(Debug, Parser)]
#[command(name = "recbook")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding the record files (overrides configuration)
    #[arg(short, long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Record file format (overrides configuration)
    #[arg(short, long, global = true, value_enum)]
    pub format: Option<FormatArg>,

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
    /// Add a record and print its id
    Add(AddCommand),

    /// List all records of a type
    List(ListCommand),

    /// Show one record
    Show(ShowCommand),

    /// Replace a record
    Update(UpdateCommand),

    /// Delete a record
    Delete(DeleteCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}
