//! Loads [`RunoverConfig`] from a YAML file plus environment overrides.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::domain::config::RunoverConfig;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "RUNOVER_CONFIG";

pub const INVENTORY_URL_ENV: &str = "RUNOVER_INVENTORY_URL";
pub const INVENTORY_USER_ENV: &str = "RUNOVER_INVENTORY_USER";
pub const INVENTORY_PASSWORD_ENV: &str = "RUNOVER_INVENTORY_PASSWORD";
pub const INVENTORY_TOKEN_ENV: &str = "RUNOVER_INVENTORY_TOKEN";

/// Reads the configuration from a YAML file on disk.
///
/// The file is looked up at the explicit path if one was given, then at
/// `$RUNOVER_CONFIG`, then at `~/.runover/config.yaml`. A missing file means
/// defaults; an unreadable or invalid one is an error.
#[derive(Debug, Default)]
pub struct YamlConfigStore {
    path: Option<PathBuf>,
}

impl YamlConfigStore {
    #[must_use]
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// Load the file and apply environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<RunoverConfig> {
        let mut config = self.load_file()?;
        apply_overrides(&mut config, |key| std::env::var(key).ok());
        Ok(config)
    }

    fn load_file(&self) -> Result<RunoverConfig> {
        let path = self.path()?;
        if !path.exists() {
            if self.path.is_some() {
                anyhow::bail!("config file {} does not exist", path.display());
            }
            return Ok(RunoverConfig::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        serde_yaml::from_str(&content).with_context(|| format!("cannot parse {}", path.display()))
    }

    /// Resolve the config file location.
    ///
    /// # Errors
    ///
    /// Returns an error if no explicit path is set and the home directory
    /// cannot be determined.
    pub fn path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.path {
            return Ok(path.clone());
        }
        if let Ok(val) = std::env::var(CONFIG_ENV) {
            return Ok(PathBuf::from(val));
        }
        let home =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
        Ok(home.join(".runover").join("config.yaml"))
    }
}

/// Overlay inventory settings taken from `lookup` (normally the process
/// environment). Empty values are ignored.
pub fn apply_overrides(config: &mut RunoverConfig, lookup: impl Fn(&str) -> Option<String>) {
    let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
    if let Some(url) = get(INVENTORY_URL_ENV) {
        config.inventory.url = url;
    }
    if let Some(user) = get(INVENTORY_USER_ENV) {
        config.inventory.username = Some(user);
    }
    if let Some(password) = get(INVENTORY_PASSWORD_ENV) {
        config.inventory.password = Some(password);
    }
    if let Some(token) = get(INVENTORY_TOKEN_ENV) {
        config.inventory.api_token = Some(token);
    }
}
