//! Execution context passed into every operation.

use crate::Identity;
use crate::Result;
use crate::SapcarConfig;
use crate::runner::CommandRunner;
use crate::runner::SystemRunner;

/// Host facilities and settings for one evaluation.
///
/// Replaces ambient lookups: the runner executes commands, `identity` is
/// the user/group used when a call does not name one, and `dry_run` turns
/// state evaluation into a report of what would change.
pub struct Context<R = SystemRunner> {
    /// SAPCAR settings.
    pub config: SapcarConfig,
    /// Command execution facility.
    pub runner: R,
    /// Default run-as identity.
    pub identity: Identity,
    /// Report changes without applying them.
    pub dry_run: bool,
}

impl Context<SystemRunner> {
    /// Creates a context that runs real processes as the current user.
    pub fn system(config: SapcarConfig) -> Result<Self> {
        Ok(Self {
            config,
            runner: SystemRunner::new(),
            identity: Identity::current()?,
            dry_run: false,
        })
    }
}

impl<R: CommandRunner> Context<R> {
    /// Creates a context with an explicit runner and identity.
    pub fn new(config: SapcarConfig, runner: R, identity: Identity) -> Self {
        Self {
            config,
            runner,
            identity,
            dry_run: false,
        }
    }

    /// Sets dry-run mode.
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}
