//! Test utilities for code that drives SAPCAR.
//!
//! [`ScriptedRunner`] replays canned process results in order and records
//! every command it was asked to run, so list/extract/state logic can be
//! exercised without a SAPCAR binary.

use crate::Result;
use crate::SapcarError;
use crate::runner::CommandResult;
use crate::runner::CommandRunner;
use crate::runner::CommandSpec;
use std::cell::RefCell;
use std::collections::VecDeque;

#[derive(Debug)]
enum Step {
    Finished(CommandResult),
    TimedOut,
}

/// A [`CommandRunner`] that returns pre-programmed results.
///
/// Running past the end of the script fails with [`SapcarError::Spawn`].
///
/// # Examples
///
/// ```
/// use sapcar_core::test_utils::ScriptedRunner;
///
/// let runner = ScriptedRunner::new()
///     .then_ok("SAPCAR: processing archive a.sar\n-rw-r--r-- 1 18 Sep 2020 11:58 A.txt\n")
///     .then_fail(1, "extraction failed");
/// assert!(runner.calls().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    script: RefCell<VecDeque<Step>>,
    calls: RefCell<Vec<CommandSpec>>,
}

impl ScriptedRunner {
    /// Creates a runner with an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a zero exit with the given standard output.
    #[must_use]
    pub fn then_ok(self, stdout: impl Into<String>) -> Self {
        self.script
            .borrow_mut()
            .push_back(Step::Finished(CommandResult::success(stdout)));
        self
    }

    /// Queues a non-zero exit with the given standard error.
    #[must_use]
    pub fn then_fail(self, code: i32, stderr: impl Into<String>) -> Self {
        self.script
            .borrow_mut()
            .push_back(Step::Finished(CommandResult::failure(code, stderr)));
        self
    }

    /// Queues a timeout.
    #[must_use]
    pub fn then_timeout(self) -> Self {
        self.script.borrow_mut().push_back(Step::TimedOut);
        self
    }

    /// Commands run so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.borrow().clone()
    }

    /// Number of extract invocations (`-xvf`) run so far.
    #[must_use]
    pub fn extract_calls(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|spec| spec.command.args.first().is_some_and(|a| a == "-xvf"))
            .count()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandResult> {
        self.calls.borrow_mut().push(spec.clone());
        match self.script.borrow_mut().pop_front() {
            Some(Step::Finished(result)) => Ok(result),
            Some(Step::TimedOut) => Err(SapcarError::Timeout {
                command: spec.command.to_string(),
                timeout: spec.timeout,
            }),
            None => Err(SapcarError::Spawn {
                program: spec.command.program.clone(),
                source: std::io::Error::other("no scripted result left"),
            }),
        }
    }
}
