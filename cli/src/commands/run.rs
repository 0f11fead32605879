//! `runover` — run a command template over a host list and print one
//! summary line.

use std::io::Write;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;

use crate::application::ports::ShellRunner;
use crate::application::services::fan_out::FanOutSettings;
use crate::application::services::run_over::{RunRequest, run_over};
use crate::domain::RunoverConfig;

/// Arguments of a fan-out run.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Hosts to run on, as a JSON array or space-separated names
    #[arg(long, required = true, num_args = 0.., value_name = "HOSTS")]
    pub hosts: Vec<String>,

    /// Command to run for every host; `$1` is the host, `$2`..`$9` the
    /// positional arguments
    #[arg(long, allow_hyphen_values = true, value_name = "TEMPLATE")]
    pub command: String,

    /// Values for `$2`..`$9`, in order (up to 8)
    #[arg(
        long = "positional_arguments",
        visible_alias = "positional-arguments",
        num_args = 0..,
        value_name = "VALUE"
    )]
    pub positional_arguments: Vec<String>,

    /// Result encoding: digit (0 if the last command returned 0, otherwise 1),
    /// digitlist (exit codes), hostlist (hosts with a non-zero exit code),
    /// valuelist (command outputs) or combinedlist (host:output pairs)
    #[arg(long = "output-format", value_name = "FORMAT")]
    pub output_format: String,

    /// Per-command timeout in seconds [default: 10]
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Number of hosts to run at once [default: 1]
    #[arg(long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Shell used to interpret the command [default: /bin/sh]
    #[arg(long, value_name = "PATH")]
    pub shell: Option<String>,
}

impl RunArgs {
    /// Execution limits: flags first, then the config file.
    #[must_use]
    pub fn settings(&self, config: &RunoverConfig) -> FanOutSettings {
        FanOutSettings {
            timeout: self
                .timeout
                .map_or_else(|| config.timeout(), Duration::from_secs),
            concurrency: self
                .concurrency
                .unwrap_or_else(|| config.effective_concurrency()),
        }
    }

    /// Shell interpreter: flag first, then the config file.
    #[must_use]
    pub fn shell<'a>(&'a self, config: &'a RunoverConfig) -> &'a str {
        self.shell.as_deref().unwrap_or(&config.shell)
    }
}

/// Run the request and print the encoded result line.
///
/// Validation failures are logged and reported as exit code 1 with nothing
/// printed; command failures are part of the result line and exit 0.
///
/// # Errors
///
/// Returns an error only if stdout cannot be written.
pub async fn run(args: &RunArgs, config: &RunoverConfig, runner: &impl ShellRunner) -> Result<ExitCode> {
    let request = RunRequest {
        hosts: &args.hosts,
        command: &args.command,
        positional_arguments: &args.positional_arguments,
        output_format: &args.output_format,
        settings: args.settings(config),
    };

    match run_over(runner, &request).await {
        Ok(line) => {
            writeln!(std::io::stdout().lock(), "{line}").context("cannot write result")?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            tracing::error!("{e}");
            Ok(ExitCode::FAILURE)
        }
    }
}
