//! Pre-workflow hook coordinator
//!
//! The first step when processing a plan/apply command: selects the hooks
//! configured for the base repository, serializes access to the working copy,
//! runs each applicable hook in order, and reports per-hook commit statuses.
//!
//! ## Execution model
//!
//! Hooks run strictly sequentially, in configuration order, with first-failure
//! -aborts semantics. Exactly one working directory lock is held for the whole
//! run, scoped to the default workspace and directory; it is released on every
//! exit path by the [`WorkspaceLock`] guard. There is no retry, no timeout,
//! and no cancellation at this layer.

use crate::selector;
use prerun_config::{RepoConfig, WorkflowHookConfig};
use prerun_core::models::{CommitStatus, HookExecutionContext, RequestContext};
use prerun_core::traits::{
    CommitStatusUpdater, HookExecutor, HookUrlGenerator, WorkingDir, WorkingDirLocker,
    WorkspaceLock,
};
use prerun_core::Result;
use std::path::Path;
use std::sync::Arc;

/// Logical workspace name every hook run locks and clones into
pub const DEFAULT_WORKSPACE: &str = "default";

/// Directory component of the lock key; hook runs always lock the repo root
pub const DEFAULT_REPO_REL_DIR: &str = ".";

/// Coordinates the end-to-end pre-workflow hook sequence
///
/// All dependencies are explicit capability interfaces; the coordinator owns
/// no global state and decides only ordering, locking discipline, and
/// partial-failure policy.
pub struct PreWorkflowHookCoordinator {
    locker: Arc<dyn WorkingDirLocker>,
    working_dir: Arc<dyn WorkingDir>,
    status_updater: Arc<dyn CommitStatusUpdater>,
    executor: Arc<dyn HookExecutor>,
    router: Arc<dyn HookUrlGenerator>,
    repos: Vec<RepoConfig>,
}

impl PreWorkflowHookCoordinator {
    /// Create a coordinator over the given collaborators and repo configuration
    pub fn new(
        locker: Arc<dyn WorkingDirLocker>,
        working_dir: Arc<dyn WorkingDir>,
        status_updater: Arc<dyn CommitStatusUpdater>,
        executor: Arc<dyn HookExecutor>,
        router: Arc<dyn HookUrlGenerator>,
        repos: Vec<RepoConfig>,
    ) -> Self {
        Self {
            locker,
            working_dir,
            status_updater,
            executor,
            router,
            repos,
        }
    }

    /// Run the pre-workflow hooks configured for the request's base repository
    ///
    /// Short-circuits with `Ok(())` and no side effects when no hooks apply.
    /// Otherwise acquires the workspace lock, materializes the working copy,
    /// marks the invoking command's combined status pending (best effort),
    /// and delegates to the hook loop. The first error aborts the run; the
    /// lock is released regardless of how the run terminates.
    pub fn run_pre_hooks(&self, ctx: &RequestContext) -> Result<()> {
        let hooks = selector::select_hooks(&self.repos, &ctx.base_repo);

        // Short circuit any other calls if there are no pre-hooks configured
        if hooks.is_empty() {
            return Ok(());
        }

        tracing::debug!(
            repo = %ctx.base_repo.full_name,
            pull = ctx.pull.num,
            count = hooks.len(),
            "pre-workflow hooks configured, running"
        );

        let _lock: WorkspaceLock = self.locker.try_lock(
            &ctx.base_repo.full_name,
            ctx.pull.num,
            DEFAULT_WORKSPACE,
            DEFAULT_REPO_REL_DIR,
        )?;
        tracing::debug!("got workspace lock");

        let cloned = self
            .working_dir
            .clone_repo(&ctx.head_repo, &ctx.pull, DEFAULT_WORKSPACE)?;

        // Flip the plan/apply combined status to pending while the hooks run.
        // This is a UX signal, not a precondition: a failure is logged only.
        if let Some(command) = &ctx.command
            && let Err(e) = self.status_updater.update_combined(
                &ctx.base_repo,
                &ctx.pull,
                CommitStatus::Pending,
                command.name,
            )
        {
            tracing::warn!(command = %command.name, "unable to update combined commit status: {e}");
        }

        let hook_ctx = HookExecutionContext {
            base_repo: ctx.base_repo.clone(),
            head_repo: ctx.head_repo.clone(),
            pull: ctx.pull.clone(),
            user: ctx.user.clone(),
            command_name: ctx
                .command
                .as_ref()
                .map(|command| command.name.to_string())
                .unwrap_or_default(),
            escaped_comment_args: ctx
                .command
                .as_ref()
                .map(prerun_core::models::CommentCommand::escaped_flags)
                .unwrap_or_default(),
            hook_id: String::new(),
        };

        self.run_hooks(&hook_ctx, &hooks, &cloned.dir)
    }

    /// Run the filtered hook sequence in order, failing fast on the first error
    fn run_hooks(
        &self,
        ctx: &HookExecutionContext,
        hooks: &[WorkflowHookConfig],
        repo_dir: &Path,
    ) -> Result<()> {
        for (i, hook) in hooks.iter().enumerate() {
            let description = match hook.description.as_deref() {
                Some(description) if !description.is_empty() => description.to_string(),
                _ => format!("Pre workflow hook #{i}"),
            };

            if !hook.applies_to(&ctx.command_name) {
                tracing::debug!(
                    hook = %description,
                    command = %ctx.command_name,
                    filter = hook.commands.as_deref().unwrap_or(""),
                    "skipping pre-workflow hook, command not in filter"
                );
                continue;
            }

            let hook_ctx = HookExecutionContext {
                hook_id: uuid::Uuid::new_v4().to_string(),
                ..ctx.clone()
            };
            tracing::debug!(hook = %description, hook_id = %hook_ctx.hook_id, "running pre-workflow hook");

            let shell = hook.resolved_shell();
            let shell_args = hook.resolved_shell_args();

            let url = self.router.generate_hook_url(&hook_ctx.hook_id)?;

            self.status_updater.update_pre_workflow_hook(
                &ctx.pull,
                CommitStatus::Pending,
                &description,
                "",
                &url,
            )?;

            match self
                .executor
                .run(&hook_ctx, &hook.run_command, shell, shell_args, repo_dir)
            {
                Ok(output) => {
                    self.status_updater.update_pre_workflow_hook(
                        &ctx.pull,
                        CommitStatus::Success,
                        &description,
                        &output.runtime_description,
                        &url,
                    )?;
                }
                Err(err) => {
                    // Best effort: the execution error is the one surfaced
                    if let Err(report_err) = self.status_updater.update_pre_workflow_hook(
                        &ctx.pull,
                        CommitStatus::Failed,
                        &description,
                        err.runtime_description(),
                        &url,
                    ) {
                        tracing::warn!(
                            hook = %description,
                            "unable to update pre-workflow hook status: {report_err}"
                        );
                    }
                    return Err(err);
                }
            }
        }

        Ok(())
    }
}

impl std::fmt::Debug for PreWorkflowHookCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreWorkflowHookCoordinator")
            .field("repos", &self.repos.len())
            .finish_non_exhaustive()
    }
}
