//! Domain types for runover configuration.
//!
//! Pure types only — no I/O, no async, no filesystem access.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_CONCURRENCY: usize = 1;
pub const DEFAULT_SHELL: &str = "/bin/sh";
pub const DEFAULT_INVENTORY_URL: &str = "http://zabbix.local/zabbix";

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.runover/config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunoverConfig {
    /// Per-command timeout in seconds.
    pub timeout_secs: u64,
    /// Maximum number of commands running at once.
    pub concurrency: usize,
    /// Shell interpreter, invoked as `<shell> -c <command>`.
    pub shell: String,
    /// Append log events here instead of writing them to stderr.
    pub log_file: Option<PathBuf>,
    /// Host inventory connection.
    pub inventory: InventoryConfig,
}

impl Default for RunoverConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            concurrency: DEFAULT_CONCURRENCY,
            shell: DEFAULT_SHELL.to_string(),
            log_file: None,
            inventory: InventoryConfig::default(),
        }
    }
}

impl RunoverConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Concurrency bound, never below one.
    #[must_use]
    pub fn effective_concurrency(&self) -> usize {
        self.concurrency.max(1)
    }
}

/// Inventory API endpoint and credentials.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// Frontend URL; the JSON-RPC endpoint is `<url>/api_jsonrpc.php`.
    pub url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Pre-issued API token. When set, no login call is made.
    pub api_token: Option<String>,
    /// Send the session in the request body (`auth` member) instead of an
    /// `Authorization` header. Needed for Zabbix older than 6.4.
    pub auth_in_body: bool,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_INVENTORY_URL.to_string(),
            username: None,
            password: None,
            api_token: None,
            auth_in_body: false,
        }
    }
}

impl InventoryConfig {
    /// The JSON-RPC endpoint derived from `url`.
    #[must_use]
    pub fn endpoint(&self) -> String {
        let base = self.url.trim_end_matches('/');
        if base.ends_with("api_jsonrpc.php") {
            base.to_string()
        } else {
            format!("{base}/api_jsonrpc.php")
        }
    }
}

// Credentials stay out of logs.
impl std::fmt::Debug for InventoryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InventoryConfig")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("api_token", &self.api_token.as_ref().map(|_| "***"))
            .field("auth_in_body", &self.auth_in_body)
            .finish()
    }
}
