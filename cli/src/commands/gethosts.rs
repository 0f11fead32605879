//! `gethosts` — print the hosts of inventory host groups.

use std::io::Write;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use crate::application::ports::HostInventory;
use crate::application::services::host_lookup::resolve_hosts;

/// How the host list is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// JSON array of strings, e.g. `["a","b"]`
    Json,
    /// Space-separated names on one line
    Plain,
}

/// Arguments of a host group lookup.
#[derive(Args, Debug)]
pub struct GetHostsArgs {
    /// Names of the host groups to list, separated by spaces
    #[arg(long = "host-groups", required = true, num_args = 1.., value_name = "GROUP")]
    pub host_groups: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = ListFormat::Json)]
    pub format: ListFormat,
}

/// Render host names for composition with `runover --hosts`.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_host_list(hosts: &[String], format: ListFormat) -> Result<String> {
    match format {
        ListFormat::Json => serde_json::to_string(hosts).context("cannot serialize host list"),
        ListFormat::Plain => Ok(hosts.join(" ")),
    }
}

/// Resolve the groups and print the host list.
///
/// # Errors
///
/// Returns an error if the inventory lookup fails or stdout cannot be written.
pub fn run(args: &GetHostsArgs, inventory: &impl HostInventory) -> Result<()> {
    let hosts = resolve_hosts(inventory, &args.host_groups)?;
    let line = render_host_list(&hosts, args.format)?;
    writeln!(std::io::stdout().lock(), "{line}").context("cannot write host list")?;
    Ok(())
}
