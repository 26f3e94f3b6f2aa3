//! Capability traits for prerun collaborators
//!
//! This module defines the narrow interfaces through which the coordinator
//! consumes its external collaborators, following the Dependency Inversion
//! Principle.
//!
//! By depending on these traits instead of concrete types, we achieve:
//! - **Reduced coupling**: Changes to implementations don't trigger recompilation of dependents
//! - **Better testability**: Easy to fake implementations for testing
//! - **Flexibility**: Can swap implementations at runtime if needed

use crate::Result;
use crate::models::{
    CommandName, CommitStatus, HookExecutionContext, PullRequest, Repo,
};
use std::fmt;
use std::path::{Path, PathBuf};

/// Release capability for a held working directory lock
///
/// Exactly one is held for the duration of a whole hook run. The release
/// closure runs once when the guard is dropped, on every exit path.
pub struct WorkspaceLock {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl WorkspaceLock {
    /// Create a lock guard that runs `release` on drop
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }
}

impl Drop for WorkspaceLock {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for WorkspaceLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkspaceLock")
            .field("held", &self.release.is_some())
            .finish()
    }
}

/// Grants exclusive access to a (repository, pull, workspace, directory) tuple
pub trait WorkingDirLocker: Send + Sync {
    /// Try to acquire the lock for the given tuple
    ///
    /// # Errors
    ///
    /// Returns an error when the lock is already held; the lock is then not
    /// acquired and no release is required.
    fn try_lock(
        &self,
        repo_full_name: &str,
        pull_num: u64,
        workspace: &str,
        path: &str,
    ) -> Result<WorkspaceLock>;
}

/// A materialized working copy of the pull request's head branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClonedRepo {
    /// Filesystem path usable as a hook working directory
    pub dir: PathBuf,

    /// Whether a previous checkout was replaced by a fresh clone
    pub recloned: bool,
}

/// Materializes a local directory containing the request's source branch
pub trait WorkingDir: Send + Sync {
    /// Clone the head repository's branch for the given pull request
    ///
    /// # Errors
    ///
    /// Returns an error if the working copy cannot be materialized (e.g.
    /// network failure, unknown branch, filesystem error).
    fn clone_repo(
        &self,
        head_repo: &Repo,
        pull: &PullRequest,
        workspace: &str,
    ) -> Result<ClonedRepo>;
}

/// Publishes status transitions to the collaboration platform
pub trait CommitStatusUpdater: Send + Sync {
    /// Update the combined status shown once per command on the pull request
    ///
    /// # Errors
    ///
    /// Returns an error if the platform rejects the update.
    fn update_combined(
        &self,
        repo: &Repo,
        pull: &PullRequest,
        status: CommitStatus,
        command: CommandName,
    ) -> Result<()>;

    /// Update the status of a single pre-workflow hook
    ///
    /// # Errors
    ///
    /// Returns an error if the platform rejects the update.
    fn update_pre_workflow_hook(
        &self,
        pull: &PullRequest,
        status: CommitStatus,
        description: &str,
        runtime_description: &str,
        url: &str,
    ) -> Result<()>;
}

/// Output of a completed hook execution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HookOutput {
    /// Combined stdout/stderr of the hook command
    pub output: String,

    /// Free-form runtime description, e.g. elapsed time
    pub runtime_description: String,
}

/// Runs one hook's command string in a named shell
pub trait HookExecutor: Send + Sync {
    /// Execute `run_command` with the given shell in `dir`
    ///
    /// Synchronous; blocks until the command exits.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::HookExecution`] on a failed execution; the
    /// error still carries a runtime description for status reporting.
    fn run(
        &self,
        ctx: &HookExecutionContext,
        run_command: &str,
        shell: &str,
        shell_args: &str,
        dir: &Path,
    ) -> Result<HookOutput>;
}

/// Produces a viewable progress link keyed by a hook run identifier
pub trait HookUrlGenerator: Send + Sync {
    /// Generate the progress URL for the given hook run
    ///
    /// Pure lookup/formatting; no side effects assumed.
    ///
    /// # Errors
    ///
    /// Returns an error if no URL can be produced for the identifier.
    fn generate_hook_url(&self, hook_id: &str) -> Result<String>;
}
