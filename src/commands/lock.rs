//! `kvlock list` and `kvlock clear`: operator views over the lock directory.

use super::print_record;
use crate::cli::ClearArgs;
use crate::context::LockContext;
use crate::error::{KvLockError, Result};
use crate::exit_codes;
use crate::locks;
use tracing::info;

pub(super) fn cmd_list(ctx: &LockContext) -> Result<i32> {
    let locks = locks::list_locks(&ctx.backend(), ctx.config.stale_minutes)?;

    if locks.is_empty() {
        println!("No active locks in {}.", ctx.lock_dir.display());
        return Ok(exit_codes::SUCCESS);
    }

    println!("Active locks ({}):", locks.len());
    println!();

    for lock in &locks {
        println!("  {}:", lock.name);
        match &lock.record {
            Some(record) => print_record(record, "    "),
            None => println!("    Owner:      unknown (unreadable lock record)"),
        }
        if lock.is_stale {
            println!(
                "    Status:     STALE (exceeds {} min threshold)",
                ctx.config.stale_minutes
            );
        }
        println!("    Path:       {}", lock.path.display());
        println!();
    }

    let stale_count = locks.iter().filter(|l| l.is_stale).count();
    if stale_count > 0 {
        println!(
            "Note: {} lock(s) are stale. Use `kvlock clear <name> --force` to clear.",
            stale_count
        );
    }

    Ok(exit_codes::SUCCESS)
}

pub(super) fn cmd_clear(ctx: &LockContext, args: ClearArgs) -> Result<i32> {
    if !args.force {
        return Err(KvLockError::UserError(
            "refusing to clear lock without --force flag.\n\n\
             Clearing a lock breaks mutual exclusion if its holder is still running.\n\
             Only clear locks if you are certain the holder has crashed.\n\n\
             To clear the lock, run:\n  kvlock clear {} --force"
                .replace("{}", &args.name),
        ));
    }

    let cleared = locks::clear_lock(&ctx.backend(), &args.name, ctx.config.stale_minutes)?;
    info!(
        lock = %cleared.name,
        was_stale = cleared.is_stale,
        owner = cleared.record.as_ref().map(|r| r.owner.as_str()).unwrap_or("unknown"),
        "Lock cleared"
    );

    println!("Cleared lock: {}", cleared.name);
    println!();
    println!("Lock details:");
    match &cleared.record {
        Some(record) => print_record(record, "  "),
        None => println!("  Owner:      unknown (unreadable lock record)"),
    }
    if cleared.is_stale {
        println!("  Status:     was STALE");
    }
    println!("  Path:       {}", cleared.path.display());

    Ok(exit_codes::SUCCESS)
}
