//! Command templates with `$1`..`$9` placeholders.
//!
//! `$1` is the host slot and is filled once per host by the executor.
//! `$2`..`$9` are bound to the positional arguments before any host runs.
//!
//! Substitution is plain text replacement with no shell escaping. The result
//! is handed to a shell as-is, so positional arguments are trusted input and
//! the host slot relies on [`HostName`] validation to stay metacharacter-free.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::error::TemplateError;
use crate::domain::host::HostName;

/// Placeholder for the host name.
pub const HOST_PLACEHOLDER: &str = "$1";

static HOST_PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"[$][1]").expect("valid regex")
});

static ARGUMENT_PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"[$][2-9]").expect("valid regex")
});

/// A command template whose positional arguments are already bound.
///
/// Only `$1` is left for [`ValidatedTemplate::render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedTemplate {
    command: String,
}

impl ValidatedTemplate {
    /// The command with positional arguments substituted and `$1` intact.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.command
    }

    /// Produce the final command for one host.
    #[must_use]
    pub fn render(&self, host: &HostName) -> String {
        self.command.replace(HOST_PLACEHOLDER, host.as_str())
    }
}

/// Number of `$1` matches in `template`.
#[must_use]
pub fn count_host_placeholders(template: &str) -> usize {
    HOST_PLACEHOLDER_RE.find_iter(template).count()
}

/// Number of `$2`..`$9` matches in `template`, counting repeats.
#[must_use]
pub fn count_argument_placeholders(template: &str) -> usize {
    ARGUMENT_PLACEHOLDER_RE.find_iter(template).count()
}

/// Validate `template` against `extras` and bind the positional arguments.
///
/// The check compares the number of `$2`..`$9` *matches* with the number of
/// arguments, so `echo $2 $2` needs two arguments. When `extras` is empty the
/// check is skipped and unbound placeholders are passed to the shell as-is.
///
/// Arguments are bound in order with `str::replace`: argument `k` (0-based)
/// replaces every `$(k+2)`, so eight arguments fill `$2`..`$9`. A value that
/// itself contains `$n` can be replaced again by a later step.
///
/// # Errors
///
/// - [`TemplateError::MissingHostPlaceholder`] if `$1` does not occur.
/// - [`TemplateError::ArgumentPlaceholderMismatch`] if arguments were given
///   and their count differs from the number of placeholder matches.
pub fn prepare<S: AsRef<str>>(
    template: &str,
    extras: &[S],
) -> Result<ValidatedTemplate, TemplateError> {
    if count_host_placeholders(template) == 0 {
        return Err(TemplateError::MissingHostPlaceholder);
    }

    if extras.is_empty() {
        return Ok(ValidatedTemplate {
            command: template.to_string(),
        });
    }

    let placeholders = count_argument_placeholders(template);
    if placeholders != extras.len() {
        return Err(TemplateError::ArgumentPlaceholderMismatch {
            placeholders,
            arguments: extras.len(),
        });
    }

    let mut command = template.to_string();
    for (index, value) in extras.iter().enumerate() {
        command = command.replace(&format!("${}", index + 2), value.as_ref());
    }
    Ok(ValidatedTemplate { command })
}
