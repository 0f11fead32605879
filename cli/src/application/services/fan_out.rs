//! Application service — run one command template over many hosts.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All process I/O is routed through the injected [`ShellRunner`].

use std::time::{Duration, Instant};

use futures_util::stream::{self, StreamExt};

use crate::application::ports::ShellRunner;
use crate::domain::{HostName, ResultRecord, ResultSet, ShellOutcome, ValidatedTemplate};

/// Execution limits for a fan-out run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FanOutSettings {
    /// Applied to each command separately.
    pub timeout: Duration,
    /// Maximum number of commands in flight. `0` is treated as `1`.
    pub concurrency: usize,
}

impl Default for FanOutSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(crate::domain::config::DEFAULT_TIMEOUT_SECS),
            concurrency: crate::domain::config::DEFAULT_CONCURRENCY,
        }
    }
}

/// Run `template` once per host and collect the results.
///
/// Commands start in host order and at most `settings.concurrency` run at
/// once. Results are gathered in host order whatever the completion order,
/// so the returned set iterates in input order. A host listed twice runs
/// twice and keeps the later record.
///
/// Infallible: timeouts and spawn failures become sentinel records.
pub async fn fan_out(
    runner: &impl ShellRunner,
    hosts: &[HostName],
    template: &ValidatedTemplate,
    settings: FanOutSettings,
) -> ResultSet {
    let records: Vec<(HostName, ResultRecord)> = stream::iter(hosts)
        .map(|host| run_host(runner, host, template, settings.timeout))
        .buffered(settings.concurrency.max(1))
        .collect()
        .await;
    records.into_iter().collect()
}

async fn run_host(
    runner: &impl ShellRunner,
    host: &HostName,
    template: &ValidatedTemplate,
    timeout: Duration,
) -> (HostName, ResultRecord) {
    let command = template.render(host);
    tracing::debug!(host = %host, command = %command, "running command");
    let started = Instant::now();

    let record = match runner.run_shell(&command, timeout).await {
        Ok(ShellOutcome::TimedOut) => {
            tracing::warn!(
                host = %host,
                timeout_secs = timeout.as_secs(),
                "command timed out and was killed"
            );
            ResultRecord::timed_out()
        }
        Ok(outcome) => ResultRecord::from(outcome),
        Err(e) => {
            tracing::error!(host = %host, error = %format!("{e:#}"), "cannot run command");
            ResultRecord::spawn_failed()
        }
    };

    tracing::debug!(
        host = %host,
        exit_status = record.exit_status,
        elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        "command finished"
    );
    (host.clone(), record)
}
