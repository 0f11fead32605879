//! Infrastructure implementation of the `ShellRunner` port.
//!
//! `TokioShellRunner` runs each command as `<shell> -c <command>` in its own
//! process group, so a timeout can kill the shell and everything it started.

use std::os::unix::process::ExitStatusExt;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use anyhow::{Context, Result};
use nix::sys::signal::{Signal, killpg};
use nix::unistd::Pid;
use tokio::io::AsyncReadExt;
use tokio::process::ChildStdout;

use crate::application::ports::ShellRunner;
use crate::domain::ShellOutcome;
use crate::domain::config::DEFAULT_SHELL;

/// How long stdout is still read after the shell has exited.
const STDOUT_DRAIN_GRACE: Duration = Duration::from_millis(200);

/// Production `ShellRunner` — uses tokio for async process execution with
/// a per-command timeout.
///
/// Stdout is captured, stderr passes through to the caller's stream and stdin
/// is closed. Once the shell exits, stdout is read for at most
/// [`STDOUT_DRAIN_GRACE`] more, so a daemon it left behind holding the pipe
/// neither blocks the result nor gets killed. On timeout the process group
/// receives `SIGKILL` and the shell is reaped before the outcome is returned.
pub struct TokioShellRunner {
    shell: String,
}

impl TokioShellRunner {
    #[must_use]
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }
}

impl Default for TokioShellRunner {
    fn default() -> Self {
        Self::new(DEFAULT_SHELL)
    }
}

impl ShellRunner for TokioShellRunner {
    async fn run_shell(&self, command: &str, timeout: Duration) -> Result<ShellOutcome> {
        let shell = &self.shell;
        let mut child = tokio::process::Command::new(shell)
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .process_group(0)
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("failed to spawn {shell}"))?;

        let stdout_handle = child.stdout.take();

        tokio::select! {
            result = async {
                let mut stdout = Vec::new();
                let status = {
                    let reader = read_stdout(stdout_handle, &mut stdout);
                    tokio::pin!(reader);
                    let mut drained = false;
                    let status = tokio::select! {
                        status = child.wait() => status,
                        () = &mut reader => {
                            drained = true;
                            child.wait().await
                        }
                    };
                    // A background process may still hold the pipe open.
                    if !drained {
                        let _ = tokio::time::timeout(STDOUT_DRAIN_GRACE, &mut reader).await;
                    }
                    status
                };
                let status = status.with_context(|| format!("waiting for {shell}"))?;
                Ok(ShellOutcome::Completed {
                    status: exit_code(status),
                    stdout,
                })
            } => result,
            () = tokio::time::sleep(timeout) => {
                if let Some(pid) = child.id() {
                    kill_process_group(pid);
                }
                let _ = child.kill().await;
                Ok(ShellOutcome::TimedOut)
            }
        }
    }
}

/// Read `pipe` to EOF into `buf`.
///
/// Chunks land in `buf` as they arrive, so dropping the future early keeps
/// everything read so far.
async fn read_stdout(pipe: Option<ChildStdout>, buf: &mut Vec<u8>) {
    let Some(mut pipe) = pipe else {
        return;
    };
    let mut chunk = [0u8; 8192];
    loop {
        match pipe.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }
}

/// Exit code, or the negated signal number for a signal-terminated process.
fn exit_code(status: ExitStatus) -> i32 {
    status
        .code()
        .or_else(|| status.signal().map(|signal| -signal))
        .unwrap_or(-1)
}

fn kill_process_group(pid: u32) {
    let Ok(raw) = i32::try_from(pid) else {
        return;
    };
    // The child leads its own group (`process_group(0)`), so pgid == pid.
    if let Err(e) = killpg(Pid::from_raw(raw), Signal::SIGKILL) {
        tracing::debug!(pid, error = %e, "cannot kill process group");
    }
}
