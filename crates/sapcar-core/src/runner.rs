//! Running external commands as a user/group with a timeout.
//!
//! [`CommandRunner`] is the seam between the SAPCAR adapter and the host.
//! [`SystemRunner`] executes real processes; tests substitute their own
//! implementation.

use crate::Identity;
use crate::Result;
use crate::SapcarError;
use crate::command::CommandLine;
use nix::unistd::Gid;
use nix::unistd::Uid;
use std::io::Read;
use std::os::unix::process::CommandExt;
use std::process::Command;
use std::process::Stdio;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use std::time::Instant;
use tracing::debug;
use wait_timeout::ChildExt;

/// Exit code reported for processes terminated by a signal.
const SIGNALED_EXIT_CODE: i32 = -1;

/// Everything needed to run one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Program and arguments.
    pub command: CommandLine,
    /// Identity the process runs as.
    pub run_as: Identity,
    /// Upper bound on the run time.
    pub timeout: Duration,
}

/// Outcome of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandResult {
    /// Exit code; zero is success.
    pub code: i32,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
}

impl CommandResult {
    /// Creates a successful result with the given standard output.
    #[must_use]
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            code: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Creates a failed result with the given code and standard error.
    #[must_use]
    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Returns `true` if the exit code is zero.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.code == 0
    }
}

/// Executes a command and captures its output.
///
/// Implementations return `Ok` for any process that ran to completion,
/// whatever its exit code. `Err` is reserved for processes that could not be
/// started or were killed on timeout.
pub trait CommandRunner {
    /// Runs `spec` to completion.
    fn run(&self, spec: &CommandSpec) -> Result<CommandResult>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, spec: &CommandSpec) -> Result<CommandResult> {
        (**self).run(spec)
    }
}

/// Runs commands as local child processes.
///
/// The child only switches uid/gid when the requested identity differs from
/// the current process, which requires the appropriate privileges.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    /// Creates a new runner.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandResult> {
        let (uid, gid) = spec.run_as.resolve()?;

        let mut cmd = Command::new(&spec.command.program);
        cmd.args(&spec.command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if gid != Gid::current().as_raw() {
            cmd.gid(gid);
        }
        if uid != Uid::current().as_raw() {
            cmd.uid(uid);
        }

        debug!(command = %spec.command, user = %spec.run_as.user, group = %spec.run_as.group, "spawning");
        let deadline = Instant::now() + spec.timeout;
        let mut child = cmd.spawn().map_err(|source| SapcarError::Spawn {
            program: spec.command.program.clone(),
            source,
        })?;

        // Drain both pipes while waiting so a chatty child cannot block.
        let stdout = child.stdout.take().map(drain);
        let stderr = child.stderr.take().map(drain);

        let Some(status) = child.wait_timeout(spec.timeout)? else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(timeout_error(spec));
        };

        // A grandchild holding the pipes open must not outlive the budget.
        let (Some(stdout), Some(stderr)) = (collect(stdout, deadline), collect(stderr, deadline))
        else {
            return Err(timeout_error(spec));
        };

        Ok(CommandResult {
            code: status.code().unwrap_or(SIGNALED_EXIT_CODE),
            stdout,
            stderr,
        })
    }
}

fn timeout_error(spec: &CommandSpec) -> SapcarError {
    SapcarError::Timeout {
        command: spec.command.to_string(),
        timeout: spec.timeout,
    }
}

fn drain<R: Read + Send + 'static>(mut reader: R) -> mpsc::Receiver<Vec<u8>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = reader.read_to_end(&mut buf);
        let _ = tx.send(buf);
    });
    rx
}

/// Waits for a drained pipe until `deadline`; `None` if it is still open.
fn collect(rx: Option<mpsc::Receiver<Vec<u8>>>, deadline: Instant) -> Option<String> {
    let Some(rx) = rx else {
        return Some(String::new());
    };
    match rx.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
        Ok(buf) => Some(String::from_utf8_lossy(&buf).into_owned()),
        Err(mpsc::RecvTimeoutError::Disconnected) => Some(String::new()),
        Err(mpsc::RecvTimeoutError::Timeout) => None,
    }
}
