//! Host name validation and host list parsing.
//!
//! Pure functions only — no I/O, no async.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::error::HostError;

/// Maximum length of a host name in bytes, measured before the trailing dot
/// is stripped.
pub const MAX_HOSTNAME_LEN: usize = 255;

/// One dot-separated label: 1–63 letters, digits or hyphens.
static LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Safety: this is a compile-time constant pattern — cannot fail.
    #[allow(clippy::expect_used)]
    Regex::new(r"^[A-Za-z0-9-]{1,63}$").expect("valid regex")
});

/// A validated DNS-style host name.
///
/// The only way to obtain one is [`HostName::parse`], so every value in the
/// system has passed the label rules. This is what keeps the `$1` slot of a
/// shell command free of metacharacters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HostName(String);

impl HostName {
    /// Validate `raw` as a host name.
    ///
    /// A single trailing dot is ignored by validation but kept in the stored
    /// name, so `a.example.com.` and `a.example.com` stay distinct hosts.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::InvalidHostName`] if `raw` is longer than 255
    /// bytes or any label is empty, too long, contains characters outside
    /// `[A-Za-z0-9-]`, or starts or ends with `-`.
    pub fn parse(raw: &str) -> Result<Self, HostError> {
        if is_valid_hostname(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(HostError::InvalidHostName(raw.to_string()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HostName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for HostName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Returns `true` if `hostname` is a valid DNS-style host name.
pub fn is_valid_hostname(hostname: &str) -> bool {
    if hostname.is_empty() || hostname.len() > MAX_HOSTNAME_LEN {
        return false;
    }
    let hostname = hostname.strip_suffix('.').unwrap_or(hostname);
    hostname.split('.').all(is_valid_label)
}

fn is_valid_label(label: &str) -> bool {
    LABEL_RE.is_match(label) && !label.starts_with('-') && !label.ends_with('-')
}

/// Turn the raw `--hosts` values into candidate host name tokens.
///
/// The values are joined with single spaces and decoded as a JSON array of
/// strings first (`--hosts '["a", "b"]'`, or the same array split apart by
/// the shell). If that fails every value is split on whitespace instead.
/// Nothing is stripped: leftovers such as quotes or brackets are left for
/// [`validate_hosts`] to reject.
#[must_use]
pub fn parse_host_tokens(raw: &[String]) -> Vec<String> {
    let joined = raw.join(" ");
    if let Ok(names) = serde_json::from_str::<Vec<String>>(&joined) {
        return names;
    }
    raw.iter()
        .flat_map(|value| value.split_whitespace())
        .map(str::to_string)
        .collect()
}

/// Validate every candidate, failing closed on the first bad one.
///
/// # Errors
///
/// Returns [`HostError::InvalidHostName`] for the first invalid candidate.
pub fn validate_hosts<S: AsRef<str>>(candidates: &[S]) -> Result<Vec<HostName>, HostError> {
    candidates
        .iter()
        .map(|candidate| HostName::parse(candidate.as_ref()))
        .collect()
}
