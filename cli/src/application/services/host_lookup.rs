//! Application service — resolve host group names to host names.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use anyhow::{Context, Result};

use crate::application::ports::HostInventory;

/// Flatten the hosts of the named groups.
///
/// Groups are visited in argument order; an inventory holding several groups
/// with the same name contributes all of them in API order. Hosts that belong
/// to more than one requested group appear once per group. Unknown group
/// names contribute nothing.
///
/// # Errors
///
/// Returns an error if the inventory cannot be queried.
pub fn resolve_hosts(inventory: &impl HostInventory, group_names: &[String]) -> Result<Vec<String>> {
    let groups = inventory.host_groups().context("cannot list host groups")?;
    let mut hostnames = Vec::new();

    for wanted in group_names {
        let mut found = false;
        for group in groups.iter().filter(|g| &g.name == wanted) {
            found = true;
            let hosts = inventory
                .hosts_in_group(&group.group_id)
                .with_context(|| format!("cannot list hosts of group '{}'", group.name))?;
            tracing::debug!(group = %group.name, hosts = hosts.len(), "resolved host group");
            hostnames.extend(hosts);
        }
        if !found {
            tracing::warn!(group = %wanted, "host group not found in inventory");
        }
    }

    Ok(hostnames)
}
