//! Bounded execution of the verifier process.

use crate::models::RawOutput;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use thiserror::Error;
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tracing::{debug, warn};

/// Failure to run the verifier to completion.
#[derive(Error, Debug)]
pub enum RunError {
    #[error("process exceeded its time limit")]
    TimedOut,
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// Runs `<executable> <subcommand> <input>` under a wall-clock limit.
#[derive(Debug, Clone)]
pub struct ToolRunner {
    subcommand: String,
    timeout: Duration,
}

impl ToolRunner {
    pub fn new(subcommand: impl Into<String>, timeout: Duration) -> Self {
        Self {
            subcommand: subcommand.into(),
            timeout,
        }
    }

    /// Run the tool on `input` and capture both output streams.
    ///
    /// On timeout the child's whole process group is killed, the child is
    /// reaped before returning, and whatever it printed so far is discarded.
    pub async fn run(&self, executable: &Path, input: &Path) -> Result<RawOutput, RunError> {
        let mut command = Command::new(executable);
        command
            .arg(&self.subcommand)
            .arg(input)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        // Own process group, so a timeout also reaches anything it forks
        #[cfg(unix)]
        command.process_group(0);

        let mut child = command.spawn()?;
        // Group id outlives the child's own reaping while forks hold it
        #[cfg(unix)]
        let group = child.id();

        debug!(
            pid = child.id().unwrap_or(0),
            "Spawned {} {} {}",
            executable.display(),
            self.subcommand,
            input.display()
        );

        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| std::io::Error::other("stdout was not captured"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| std::io::Error::other("stderr was not captured"))?;

        let completion = async {
            let mut stdout_buf = Vec::new();
            let mut stderr_buf = Vec::new();

            let (status, stdout_read, stderr_read) = tokio::join!(
                child.wait(),
                stdout.read_to_end(&mut stdout_buf),
                stderr.read_to_end(&mut stderr_buf),
            );
            stdout_read?;
            stderr_read?;
            let status = status?;

            Ok::<_, std::io::Error>(RawOutput {
                exit_code: exit_code(status),
                stdout: String::from_utf8_lossy(&stdout_buf).into_owned(),
                stderr: String::from_utf8_lossy(&stderr_buf).into_owned(),
            })
        };

        let outcome = tokio::time::timeout(self.timeout, completion).await;

        match outcome {
            Ok(result) => Ok(result?),
            Err(_) => {
                warn!(
                    "{} did not finish within {:?}, killing it",
                    executable.display(),
                    self.timeout
                );
                #[cfg(unix)]
                kill_process_group(group);
                if let Err(e) = child.kill().await {
                    warn!("Failed to kill {}: {}", executable.display(), e);
                }
                Err(RunError::TimedOut)
            }
        }
    }
}

/// SIGKILL every process in the group led by the spawned child.
#[cfg(unix)]
fn kill_process_group(group: Option<u32>) {
    use nix::errno::Errno;
    use nix::sys::signal::{killpg, Signal};
    use nix::unistd::Pid;

    let Some(pgid) = group else {
        return;
    };

    match killpg(Pid::from_raw(pgid as i32), Signal::SIGKILL) {
        Ok(()) | Err(Errno::ESRCH) => {}
        Err(e) => warn!(pgid, error = %e, "Failed to kill process group"),
    }
}

/// Exit code of a finished process. Signal deaths map to the negated
/// signal number on unix, `-1` elsewhere.
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return -signal;
        }
    }

    -1
}
