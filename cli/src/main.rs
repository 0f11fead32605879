//! runover - run a command over monitored hosts and summarise the results

use std::process::ExitCode;

use clap::Parser;

use runover_cli::cli::{Cli, report_error};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.run().await {
        Ok(code) => code,
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}
