use clap::Parser;
use dirsort::cli::{Args, run_cli};
use dirsort::logging::init_logging;
use dirsort::output::OutputFormatter;
use std::process::ExitCode;

fn main() -> ExitCode {
    init_logging();

    // Invalid or missing directories exit here with clap's usage message.
    let args = Args::parse();

    match run_cli(&args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            OutputFormatter::error(&format!("Error: {}", e));
            ExitCode::FAILURE
        }
    }
}
