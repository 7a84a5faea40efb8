use std::path::PathBuf;

use clap::Parser;

pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USAGE: i32 = 1;
    pub const FAILURE: i32 = 1;
    // a module without the entry point is reported but does not fail the run
    pub const MISSING_ENTRY: i32 = SUCCESS;
}

/// Runs a compiled wasm module against the compiler's host runtime.
#[derive(Parser, Debug)]
#[command(name = "modrun", version, about)]
pub struct Cli {
    /// Path to the module (.wasm binary or .wat text)
    pub module: Option<PathBuf>,

    /// Exported function to invoke
    #[arg(long, default_value = modrun::DEFAULT_ENTRY)]
    pub entry: String,

    /// Also use the entry point's return value as the process exit status
    #[arg(long)]
    pub exit_with_result: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,
}
