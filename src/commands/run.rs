//! `kvlock run`: hold a lock for the lifetime of a child process.

use crate::backend::Backend;
use crate::cli::RunArgs;
use crate::context::LockContext;
use crate::error::{KvLockError, Result};
use crate::exit_codes;
use crate::locks::{AcquireMode, LockRecord};
use std::process::{Command as ProcessCommand, ExitStatus};
use tracing::{info, warn};

pub(super) fn cmd_run(ctx: &LockContext, args: RunArgs) -> Result<i32> {
    let (program, program_args) = args
        .command
        .split_first()
        .ok_or_else(|| KvLockError::UserError("no command given to run".to_string()))?;

    // The manager reports a broken backend as contention; surface it first.
    ctx.backend().ensure_dir()?;

    let manager = ctx.manager();
    let mode = args.mode();

    let Some(guard) = manager.acquire_guard(&args.name, mode) else {
        return Err(KvLockError::LockError(describe_contention(ctx, &args.name, mode)?));
    };
    info!(lock = %args.name, program = %program, "Running command under lock");

    // Spawn errors return early; dropping the guard releases the lock.
    let status = ProcessCommand::new(program)
        .args(program_args)
        .status()
        .map_err(|e| KvLockError::UserError(format!("failed to run '{}': {}", program, e)))?;

    if !guard.release() {
        warn!(lock = %args.name, "Lock could not be released after command finished");
    }

    Ok(exit_code_of(status))
}

fn describe_contention(ctx: &LockContext, name: &str, mode: AcquireMode) -> Result<String> {
    let waited = match mode {
        AcquireMode::Bounded(timeout) => format!(" after waiting {} ms", timeout.as_millis()),
        _ => String::new(),
    };

    let holder = ctx
        .backend()
        .read(name)?
        .and_then(|payload| LockRecord::from_slice(&payload).ok())
        .map(|record| {
            format!(
                "\nHeld by: {} (pid {}, acquired {} ago)",
                record.owner,
                record
                    .pid
                    .map(|p| p.to_string())
                    .unwrap_or_else(|| "unknown".to_string()),
                record.age_string()
            )
        })
        .unwrap_or_default();

    Ok(format!("'{}' is held by another process{}{}", name, waited, holder))
}

fn exit_code_of(status: ExitStatus) -> i32 {
    // No code means the child was killed by a signal.
    status.code().unwrap_or(exit_codes::USER_ERROR)
}
