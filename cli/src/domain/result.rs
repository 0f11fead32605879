//! Per-host execution results.
//!
//! Pure types only — no I/O, no async.

use std::collections::HashMap;

use crate::domain::host::HostName;

/// Exit status recorded for a host whose command exceeded the timeout.
pub const TIMEOUT_EXIT_STATUS: i32 = 124;

/// Exit status recorded for a host whose shell could not be spawned.
pub const SPAWN_FAILURE_EXIT_STATUS: i32 = 127;

/// What a shell runner observed for one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellOutcome {
    /// The process terminated on its own.
    ///
    /// `status` is the exit code, or the negated signal number when the
    /// process was killed by a signal.
    Completed { status: i32, stdout: Vec<u8> },
    /// The process was still running when the timeout fired and was killed.
    TimedOut,
}

/// Outcome of running the command for one host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRecord {
    pub exit_status: i32,
    /// Standard output with trailing newlines removed.
    pub output: String,
}

impl ResultRecord {
    #[must_use]
    pub fn new(exit_status: i32, output: impl Into<String>) -> Self {
        Self {
            exit_status,
            output: output.into(),
        }
    }

    /// Build a record from raw stdout: lossy UTF-8, trailing `\n` stripped.
    #[must_use]
    pub fn from_stdout(exit_status: i32, stdout: &[u8]) -> Self {
        let text = String::from_utf8_lossy(stdout);
        Self::new(exit_status, text.trim_end_matches('\n'))
    }

    #[must_use]
    pub fn timed_out() -> Self {
        Self::new(TIMEOUT_EXIT_STATUS, "")
    }

    #[must_use]
    pub fn spawn_failed() -> Self {
        Self::new(SPAWN_FAILURE_EXIT_STATUS, "")
    }

    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.exit_status == 0
    }
}

impl From<ShellOutcome> for ResultRecord {
    fn from(outcome: ShellOutcome) -> Self {
        match outcome {
            ShellOutcome::Completed { status, stdout } => Self::from_stdout(status, &stdout),
            ShellOutcome::TimedOut => Self::timed_out(),
        }
    }
}

/// Insertion-ordered map of host to result.
///
/// Inserting a host that is already present replaces its record but keeps
/// the position of the first insertion (last write wins, first position
/// stays).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    entries: Vec<(HostName, ResultRecord)>,
    index: HashMap<HostName, usize>,
}

impl ResultSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the record for `host`.
    pub fn insert(&mut self, host: HostName, record: ResultRecord) {
        if let Some(&position) = self.index.get(&host) {
            self.entries[position].1 = record;
        } else {
            self.index.insert(host.clone(), self.entries.len());
            self.entries.push((host, record));
        }
    }

    #[must_use]
    pub fn get(&self, host: &HostName) -> Option<&ResultRecord> {
        self.index.get(host).map(|&position| &self.entries[position].1)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&HostName, &ResultRecord)> {
        self.entries.iter().map(|(host, record)| (host, record))
    }
}

impl FromIterator<(HostName, ResultRecord)> for ResultSet {
    fn from_iter<I: IntoIterator<Item = (HostName, ResultRecord)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (host, record) in iter {
            set.insert(host, record);
        }
        set
    }
}
