//! Command implementations for kvlock.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Each handler returns the process exit code on success.

mod lock;
mod run;
mod status;

use crate::cli::{Cli, Command};
use crate::context::LockContext;
use crate::error::Result;
use crate::locks::LockRecord;

/// Dispatch a command to its implementation.
///
/// This is the main entry point for command execution. The lock context is
/// resolved once here and shared by every handler.
pub fn dispatch(cli: Cli) -> Result<i32> {
    let ctx = LockContext::resolve(cli.config.as_deref(), cli.lock_dir.as_deref())?;

    match cli.command {
        Command::Run(args) => run::cmd_run(&ctx, args),
        Command::Status(args) => status::cmd_status(&ctx, args),
        Command::List => lock::cmd_list(&ctx),
        Command::Clear(args) => lock::cmd_clear(&ctx, args),
    }
}

/// Print the holder details shared by `status`, `list`, and `clear`.
fn print_record(record: &LockRecord, indent: &str) {
    println!("{}Owner:      {}", indent, record.owner);
    if let Some(pid) = record.pid {
        println!("{}PID:        {}", indent, pid);
    }
    println!("{}Instance:   {}", indent, record.instance);
    println!(
        "{}Created:    {}",
        indent,
        record.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("{}Age:        {}", indent, record.age_string());
}
