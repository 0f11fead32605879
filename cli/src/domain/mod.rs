//! Domain layer — pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod error;
pub mod format;
pub mod host;
pub mod inventory;
pub mod result;
pub mod template;

pub use config::{InventoryConfig, RunoverConfig};
pub use error::{EncodingError, HostError, InventoryError, RunError, TemplateError};
pub use format::{OutputFormat, encode, encode_as};
pub use host::{HostName, parse_host_tokens, validate_hosts};
pub use inventory::{HostGroup, InventoryHost};
pub use result::{ResultRecord, ResultSet, ShellOutcome};
pub use template::{ValidatedTemplate, prepare};
