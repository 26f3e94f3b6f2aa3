//! Shell hook execution
//!
//! Runs one hook's command string in its configured shell, inside the
//! materialized workspace, with the request identity exported through the
//! environment. Stderr is folded into stdout and the combined output is
//! captured so it can be attached to the hook's status.

use prerun_core::models::HookExecutionContext;
use prerun_core::traits::{HookExecutor, HookOutput};
use prerun_core::{Error, Result};
use std::path::Path;
use std::time::{Duration, Instant};

/// Default [`HookExecutor`] spawning the configured shell via duct
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellHookExecutor;

impl ShellHookExecutor {
    /// Create a new shell executor
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn duration_description(elapsed: Duration) -> String {
    format!("duration: {:.1}s", elapsed.as_secs_f64())
}

impl HookExecutor for ShellHookExecutor {
    fn run(
        &self,
        ctx: &HookExecutionContext,
        run_command: &str,
        shell: &str,
        shell_args: &str,
        dir: &Path,
    ) -> Result<HookOutput> {
        let mut argv = shell_words::split(shell_args).map_err(|e| Error::HookExecution {
            message: format!("failed to parse shell args '{shell_args}': {e}"),
            runtime_description: String::new(),
        })?;
        argv.push(run_command.to_string());

        tracing::debug!(
            %shell,
            args = %shell_args,
            dir = %dir.display(),
            hook_id = %ctx.hook_id,
            "executing pre-workflow hook command"
        );

        let start = Instant::now();
        let output = duct::cmd(shell, &argv)
            .dir(dir)
            .env("BASE_REPO_NAME", &ctx.base_repo.name)
            .env("BASE_REPO_OWNER", &ctx.base_repo.owner)
            .env("HEAD_REPO_NAME", &ctx.head_repo.name)
            .env("HEAD_REPO_OWNER", &ctx.head_repo.owner)
            .env("HEAD_BRANCH_NAME", &ctx.pull.head_branch)
            .env("BASE_BRANCH_NAME", &ctx.pull.base_branch)
            .env("PULL_NUM", ctx.pull.num.to_string())
            .env("PULL_AUTHOR", &ctx.pull.author)
            .env("USER_NAME", &ctx.user.username)
            .env("COMMAND_NAME", &ctx.command_name)
            .env("COMMENT_ARGS", ctx.escaped_comment_args.join(","))
            .env("DIR", dir.display().to_string())
            .stderr_to_stdout()
            .stdout_capture()
            .unchecked()
            .run()
            .map_err(|e| Error::HookExecution {
                message: format!("failed to spawn '{shell}': {e}"),
                runtime_description: duration_description(start.elapsed()),
            })?;

        let runtime_description = duration_description(start.elapsed());
        let text = String::from_utf8_lossy(&output.stdout).to_string();

        if output.status.success() {
            tracing::debug!(hook_id = %ctx.hook_id, %runtime_description, "hook command succeeded");
            Ok(HookOutput {
                output: text,
                runtime_description,
            })
        } else {
            Err(Error::HookExecution {
                message: format!(
                    "command '{run_command}' exited with {}: {}",
                    output.status,
                    text.trim_end()
                ),
                runtime_description,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use prerun_core::models::{PullRequest, Repo, User};

    fn ctx() -> HookExecutionContext {
        HookExecutionContext {
            base_repo: Repo {
                full_name: "acme/app".to_string(),
                owner: "acme".to_string(),
                name: "app".to_string(),
                clone_url: "https://example.com/acme/app.git".to_string(),
            },
            head_repo: Repo {
                full_name: "fork/app".to_string(),
                owner: "fork".to_string(),
                name: "app".to_string(),
                clone_url: "https://example.com/fork/app.git".to_string(),
            },
            pull: PullRequest {
                num: 7,
                head_branch: "feature".to_string(),
                base_branch: "main".to_string(),
                author: "octocat".to_string(),
            },
            user: User {
                username: "reviewer".to_string(),
            },
            command_name: "plan".to_string(),
            escaped_comment_args: vec![],
            hook_id: "test-hook-id".to_string(),
        }
    }

    #[test]
    fn test_run_captures_output() {
        let dir = tempfile::tempdir().unwrap();
        let out = ShellHookExecutor::new()
            .run(&ctx(), "echo hello", "sh", "-c", dir.path())
            .unwrap();

        assert_eq!(out.output.trim(), "hello");
        assert!(out.runtime_description.starts_with("duration:"));
    }

    #[test]
    fn test_run_folds_stderr_into_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let out = ShellHookExecutor::new()
            .run(&ctx(), "echo oops >&2", "sh", "-c", dir.path())
            .unwrap();

        assert_eq!(out.output.trim(), "oops");
    }

    #[test]
    fn test_run_exports_request_environment() {
        let dir = tempfile::tempdir().unwrap();
        let out = ShellHookExecutor::new()
            .run(
                &ctx(),
                "printf '%s %s %s' \"$BASE_REPO_NAME\" \"$PULL_NUM\" \"$COMMAND_NAME\"",
                "sh",
                "-c",
                dir.path(),
            )
            .unwrap();

        assert_eq!(out.output, "app 7 plan");
    }

    #[test]
    fn test_run_failure_keeps_runtime_description() {
        let dir = tempfile::tempdir().unwrap();
        let err = ShellHookExecutor::new()
            .run(&ctx(), "echo failing; exit 3", "sh", "-c", dir.path())
            .unwrap_err();

        assert!(err.runtime_description().starts_with("duration:"));
        assert!(err.to_string().contains("failing"));
    }

    #[test]
    fn test_run_in_workspace_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out = ShellHookExecutor::new()
            .run(&ctx(), "pwd", "sh", "-c", dir.path())
            .unwrap();

        let reported = std::fs::canonicalize(out.output.trim()).unwrap();
        let expected = std::fs::canonicalize(dir.path()).unwrap();
        assert_eq!(reported, expected);
    }

    #[test]
    fn test_invalid_shell_args_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = ShellHookExecutor::new()
            .run(&ctx(), "echo hi", "sh", "-c 'unterminated", dir.path())
            .unwrap_err();

        assert!(err.to_string().contains("shell args"));
    }
}
