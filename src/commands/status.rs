//! `kvlock status`: report whether anyone holds a lock.

use super::print_record;
use crate::backend::Backend;
use crate::cli::StatusArgs;
use crate::context::LockContext;
use crate::error::Result;
use crate::exit_codes;
use crate::locks::LockRecord;

pub(super) fn cmd_status(ctx: &LockContext, args: StatusArgs) -> Result<i32> {
    // Read the backend directly: a failed read is an error here, not "unlocked".
    let Some(payload) = ctx.backend().read(&args.name)? else {
        println!("{}: unlocked", args.name);
        return Ok(exit_codes::SUCCESS);
    };

    println!("{}: locked", args.name);

    if let Ok(record) = LockRecord::from_slice(&payload) {
        print_record(&record, "  ");
        if record.is_stale(ctx.config.stale_minutes) {
            println!(
                "  Status:     STALE (exceeds {} min threshold)",
                ctx.config.stale_minutes
            );
        }
    }

    Ok(exit_codes::SUCCESS)
}
