//! Application service — the validate, execute, encode pipeline.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use crate::application::ports::ShellRunner;
use crate::application::services::fan_out::{FanOutSettings, fan_out};
use crate::domain::{RunError, encode, parse_host_tokens, prepare, validate_hosts};

/// Inputs of one run, as given on the command line.
#[derive(Debug, Clone)]
pub struct RunRequest<'a> {
    /// Raw `--hosts` values: a JSON array or whitespace-separated names.
    pub hosts: &'a [String],
    /// Command template containing `$1`.
    pub command: &'a str,
    /// Values for `$2`..`$9`.
    pub positional_arguments: &'a [String],
    /// Name of the output format.
    pub output_format: &'a str,
    pub settings: FanOutSettings,
}

/// Validate the request, run it, and return the encoded result line.
///
/// Every host name and the template are validated before the first command
/// is spawned; any failure aborts with nothing executed. An unknown output
/// format is only detected after execution and yields an empty line.
///
/// # Errors
///
/// Returns [`RunError::Host`] for an invalid host name and
/// [`RunError::Template`] for a placeholder/argument problem.
pub async fn run_over(runner: &impl ShellRunner, request: &RunRequest<'_>) -> Result<String, RunError> {
    let tokens = parse_host_tokens(request.hosts);
    let hosts = validate_hosts(&tokens)?;
    let template = prepare(request.command, request.positional_arguments)?;
    tracing::debug!(
        hosts = hosts.len(),
        command = template.as_str(),
        "validated run request"
    );

    let results = fan_out(runner, &hosts, &template, request.settings).await;

    match encode(&results, request.output_format) {
        Ok(line) => Ok(line),
        Err(e) => {
            tracing::error!(error = %e, "cannot encode results");
            Ok(String::new())
        }
    }
}
