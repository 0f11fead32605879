//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` — never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::time::Duration;

use anyhow::Result;

use crate::domain::{HostGroup, ShellOutcome};

// ── Shell Runner Port ─────────────────────────────────────────────────────────

/// Abstracts shell execution so the executor can be tested without spawning.
#[allow(async_fn_in_trait)]
pub trait ShellRunner {
    /// Run `command` through the shell, capturing stdout only.
    ///
    /// Stderr is inherited from the caller. A command still running after
    /// `timeout` must be killed together with everything it started, and
    /// reported as [`ShellOutcome::TimedOut`].
    ///
    /// # Errors
    ///
    /// Returns an error if the shell cannot be spawned or waited on.
    async fn run_shell(&self, command: &str, timeout: Duration) -> Result<ShellOutcome>;
}

// ── Host Inventory Port ───────────────────────────────────────────────────────

/// Abstracts the monitoring inventory that maps host groups to hosts.
pub trait HostInventory {
    /// List every host group known to the inventory.
    ///
    /// # Errors
    ///
    /// Returns an error if the inventory cannot be queried.
    fn host_groups(&self) -> Result<Vec<HostGroup>>;

    /// List the display names of the hosts in the group with `group_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the inventory cannot be queried.
    fn hosts_in_group(&self, group_id: &str) -> Result<Vec<String>>;
}
