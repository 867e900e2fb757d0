//! kvlock: hold named locks from the shell.
//!
//! This is the main entry point for the `kvlock` CLI. It parses arguments,
//! installs logging, dispatches to the command handler, and maps errors to
//! exit codes.

use kvlock::cli::Cli;
use kvlock::exit_codes;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Initialize tracing with `RUST_LOG`, falling back to `warn` (or `debug` with --verbose).
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_tracing(cli.verbose);

    match kvlock::dispatch(cli) {
        Ok(code) => ExitCode::from(u8::try_from(code).unwrap_or(exit_codes::USER_ERROR as u8)),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            ExitCode::from(err.exit_code() as u8)
        }
    }
}
