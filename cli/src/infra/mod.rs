//! Infrastructure layer — concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: process execution, the
//! inventory API client, configuration loading, and the log sink.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` are forbidden.

pub mod command_runner;
pub mod config;
pub mod inventory;
pub mod logging;

pub use command_runner::TokioShellRunner;
pub use config::YamlConfigStore;
pub use inventory::ZabbixClient;
