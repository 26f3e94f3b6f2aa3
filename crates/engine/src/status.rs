//! Status reporting sinks
//!
//! The real platform client is supplied by the embedder; this module provides
//! a no-op sink for setups without one (e.g. local dry runs).

use prerun_core::Result;
use prerun_core::models::{CommandName, CommitStatus, PullRequest, Repo};
use prerun_core::traits::CommitStatusUpdater;

/// No-op [`CommitStatusUpdater`]; every update succeeds and is only logged
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopStatusUpdater;

impl CommitStatusUpdater for NoopStatusUpdater {
    fn update_combined(
        &self,
        repo: &Repo,
        pull: &PullRequest,
        status: CommitStatus,
        command: CommandName,
    ) -> Result<()> {
        tracing::debug!(
            repo = %repo.full_name,
            pull = pull.num,
            %status,
            %command,
            "combined status update dropped (no status client configured)"
        );
        Ok(())
    }

    fn update_pre_workflow_hook(
        &self,
        pull: &PullRequest,
        status: CommitStatus,
        description: &str,
        runtime_description: &str,
        url: &str,
    ) -> Result<()> {
        tracing::debug!(
            pull = pull.num,
            %status,
            %description,
            %runtime_description,
            %url,
            "hook status update dropped (no status client configured)"
        );
        Ok(())
    }
}
