//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Host errors ───────────────────────────────────────────────────────────────

/// Errors raised while validating the resolved host list.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HostError {
    #[error("Wrong host names detected: '{0}'")]
    InvalidHostName(String),
}

// ── Template errors ───────────────────────────────────────────────────────────

/// Errors raised while validating a command template against its arguments.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Placeholder $1 for host was not found.")]
    MissingHostPlaceholder,

    #[error(
        "Arguments do not match placeholders: template has {placeholders} of $2..$9, {arguments} supplied."
    )]
    ArgumentPlaceholderMismatch { placeholders: usize, arguments: usize },
}

// ── Encoding errors ───────────────────────────────────────────────────────────

/// Errors raised while encoding a result set.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodingError {
    #[error(
        "Unknown output format '{0}'. Valid formats: digit, digitlist, hostlist, valuelist, combinedlist"
    )]
    UnknownOutputFormat(String),
}

// ── Inventory errors ──────────────────────────────────────────────────────────

/// Errors reported by the host inventory API.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InventoryError {
    #[error("Inventory API error {code}: {message} {data}")]
    Api {
        code: i64,
        message: String,
        data: String,
    },

    #[error("Malformed inventory response: {0}")]
    MalformedResponse(String),
}

// ── Pipeline errors ───────────────────────────────────────────────────────────

/// Fatal validation failures of a run. Raised before any command is spawned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RunError {
    #[error(transparent)]
    Host(#[from] HostError),

    #[error(transparent)]
    Template(#[from] TemplateError),
}
