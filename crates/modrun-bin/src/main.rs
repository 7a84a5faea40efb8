mod cli;
mod logging;

use std::io::{self, Write};

use clap::Parser;
use cli::{exit_codes, Cli};
use modrun::{RunOptions, RunOutcome, Runner};

fn main() {
    let exit_code = run();
    _ = io::stdout().flush();
    std::process::exit(exit_code);
}

fn run() -> i32 {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose, cli.log_json) {
        eprintln!("failed to initialize logging: {e}");
        return exit_codes::FAILURE;
    }

    let Some(path) = cli.module.as_deref() else {
        eprintln!("error: please provide the path to the .wasm file");
        eprintln!("usage: modrun <MODULE>");
        return exit_codes::USAGE;
    };

    let rt = match tokio::runtime::Builder::new_current_thread().build() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("failed to create runtime: {e}");
            return exit_codes::FAILURE;
        }
    };

    let options = RunOptions {
        entry: cli.entry.clone(),
    };
    let outcome = rt.block_on(async {
        let runner = Runner::new(options)?;
        runner.run_file(path, io::stdout()).await
    });

    match outcome {
        Ok(outcome) => {
            _ = outcome.report(&mut io::stdout(), &mut io::stderr());
            exit_status(&outcome, cli.exit_with_result)
        }
        Err(e) => {
            tracing::error!(path = %path.display(), "run failed");
            eprintln!("error: {:#}", anyhow::Error::new(e));
            exit_codes::FAILURE
        }
    }
}

fn exit_status(outcome: &RunOutcome, exit_with_result: bool) -> i32 {
    match outcome {
        RunOutcome::Finished { result } if exit_with_result => *result,
        RunOutcome::Finished { .. } => exit_codes::SUCCESS,
        RunOutcome::Aborted(signal) => signal.exit_status(),
        RunOutcome::MissingEntry { .. } => exit_codes::MISSING_ENTRY,
    }
}
