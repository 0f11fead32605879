//! Inventory records returned by the host inventory API.

use serde::Deserialize;

/// A named host group.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HostGroup {
    #[serde(rename = "groupid")]
    pub group_id: String,
    pub name: String,
}

/// A host as listed by the inventory; `name` is the visible display name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InventoryHost {
    #[serde(rename = "hostid")]
    pub host_id: String,
    pub name: String,
}
