// ffparse-cli/src/main.rs
//
// Entry point of the `ffparse` binary.
//
// Responsibilities:
// - Parsing command-line arguments (`Cli`).
// - Setting up console logging.
// - Running the selected subcommand against ffmpeg/ffprobe or replayed output.
// - Reporting errors and setting the process exit code.

use clap::Parser;
use ffparse_cli::output::print_error;
use ffparse_cli::{Cli, logging, run};
use std::process;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(&cli) {
        log::debug!("Command failed: {:?}", e);
        print_error(&e.to_string());
        process::exit(1);
    }
}
