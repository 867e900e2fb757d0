//! CLI argument parsing for kvlock.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use crate::locks::AcquireMode;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// kvlock: named mutual exclusion between processes through a shared lock directory.
///
/// A lock is held by whichever process first creates its file; every
/// cooperating process must use the same lock directory.
#[derive(Parser, Debug)]
#[command(name = "kvlock")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a YAML config file (default: ./kvlock.yaml if present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Lock directory, overriding the config file.
    #[arg(long, global = true)]
    pub lock_dir: Option<PathBuf>,

    /// Log lock activity to stderr (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for kvlock.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a command while holding a lock.
    ///
    /// The lock is released when the command exits, and kvlock exits with
    /// the command's exit code. Exits with code 4 if the lock is not acquired.
    Run(RunArgs),

    /// Report whether a lock is currently held by anyone.
    Status(StatusArgs),

    /// List all locks in the lock directory with owner and age.
    List,

    /// Forcibly remove a lock left behind by a crashed holder.
    ///
    /// Requires --force flag to prevent accidental clearing.
    Clear(ClearArgs),
}

/// Arguments for the `run` command.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Name of the lock to hold.
    pub name: String,

    /// Wait up to this many milliseconds for the lock (0 tries once).
    #[arg(long, conflicts_with = "wait")]
    pub timeout_ms: Option<u64>,

    /// Wait for the lock with no time limit.
    #[arg(long)]
    pub wait: bool,

    /// Command and arguments to run (after `--`).
    #[arg(last = true, required = true)]
    pub command: Vec<String>,
}

impl RunArgs {
    /// Acquisition mode selected by the flags; the default is a single attempt.
    pub fn mode(&self) -> AcquireMode {
        if self.wait {
            return AcquireMode::Blocking;
        }
        match self.timeout_ms {
            Some(ms) => AcquireMode::from_millis(ms),
            None => AcquireMode::NonBlocking,
        }
    }
}

/// Arguments for the `status` command.
#[derive(Parser, Debug)]
pub struct StatusArgs {
    /// Name of the lock to query.
    pub name: String,
}

/// Arguments for the `clear` command.
#[derive(Parser, Debug)]
pub struct ClearArgs {
    /// Name of the lock to remove.
    pub name: String,

    /// Force clearing the lock (required for safety).
    #[arg(long)]
    pub force: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
