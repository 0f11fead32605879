//! gethosts - print the hosts of inventory host groups

use std::process::ExitCode;

use clap::Parser;

use runover_cli::cli::{GetHostsCli, report_error};

fn main() -> ExitCode {
    let cli = GetHostsCli::parse();
    match cli.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}
