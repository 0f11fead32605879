//! Summary encodings of a [`ResultSet`].
//!
//! Pure functions only — no I/O, no async.

use std::fmt;
use std::str::FromStr;

use crate::domain::error::EncodingError;
use crate::domain::result::ResultSet;

pub const VALID_OUTPUT_FORMATS: &[&str] =
    &["digit", "digitlist", "hostlist", "valuelist", "combinedlist"];

/// Output encodings understood by [`encode_as`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// `0` or `1`, decided by the last record in iteration order.
    Digit,
    /// Every exit status.
    DigitList,
    /// Hosts whose exit status is non-zero.
    HostList,
    /// Every captured output.
    ValueList,
    /// `host:output` pairs.
    CombinedList,
}

impl FromStr for OutputFormat {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "digit" => Ok(Self::Digit),
            "digitlist" => Ok(Self::DigitList),
            "hostlist" => Ok(Self::HostList),
            "valuelist" => Ok(Self::ValueList),
            "combinedlist" => Ok(Self::CombinedList),
            other => Err(EncodingError::UnknownOutputFormat(other.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Digit => "digit",
            Self::DigitList => "digitlist",
            Self::HostList => "hostlist",
            Self::ValueList => "valuelist",
            Self::CombinedList => "combinedlist",
        };
        f.write_str(name)
    }
}

/// Parse `format` and encode `results` with it.
///
/// # Errors
///
/// Returns [`EncodingError::UnknownOutputFormat`] if `format` is not one of
/// [`VALID_OUTPUT_FORMATS`].
pub fn encode(results: &ResultSet, format: &str) -> Result<String, EncodingError> {
    Ok(encode_as(results, format.parse()?))
}

/// Encode `results`. List formats are joined with `,` in insertion order.
///
/// `digit` is a fold in which every record overwrites the value, so only the
/// last record counts: `[1, 0]` encodes as `"0"`. An empty set encodes as
/// `""` in every format, `digit` included.
// NOTE: `digit` is not a logical AND over all hosts. Existing triggers read
// the last-record value, so the fold must stay.
#[must_use]
pub fn encode_as(results: &ResultSet, format: OutputFormat) -> String {
    match format {
        OutputFormat::Digit => results
            .iter()
            .fold(None, |_, (_, record)| {
                Some(if record.succeeded() { "0" } else { "1" })
            })
            .unwrap_or_default()
            .to_string(),
        OutputFormat::DigitList => join(results.iter().map(|(_, r)| r.exit_status.to_string())),
        OutputFormat::HostList => join(
            results
                .iter()
                .filter(|(_, r)| !r.succeeded())
                .map(|(h, _)| h.to_string()),
        ),
        OutputFormat::ValueList => join(results.iter().map(|(_, r)| r.output.clone())),
        OutputFormat::CombinedList => {
            join(results.iter().map(|(h, r)| format!("{h}:{}", r.output)))
        }
    }
}

fn join(items: impl Iterator<Item = String>) -> String {
    items.collect::<Vec<_>>().join(",")
}
