//! Domain models for prerun
//!
//! Value types describing the source-control objects a hook run operates on:
//! repositories, pull requests, users, the invoking command, and commit
//! statuses. All of them are plain data, created per incoming command and
//! consumed read-only by the coordinator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A source-control repository
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repo {
    /// Full name including the owner, e.g. `octocat/hello-world`
    pub full_name: String,

    /// Owner or organization part of the full name
    pub owner: String,

    /// Repository name without the owner
    pub name: String,

    /// URL the repository can be cloned from
    pub clone_url: String,
}

impl Repo {
    /// Identity used when matching repository configuration entries
    #[must_use]
    pub fn id(&self) -> &str {
        &self.full_name
    }
}

/// A pull (merge) request that triggered a command
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    /// Pull request number, unique within the base repository
    pub num: u64,

    /// Branch the pull request wants to merge
    pub head_branch: String,

    /// Branch the pull request merges into
    pub base_branch: String,

    /// Username of the pull request author
    pub author: String,
}

/// The user who invoked the command
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Platform username
    pub username: String,
}

/// Name of a collaboration-platform command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandName {
    /// Produce an execution plan for the pull request
    Plan,
    /// Apply a previously produced plan
    Apply,
}

impl CommandName {
    /// Lowercase command name as it appears in comments and hook filters
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            CommandName::Plan => "plan",
            CommandName::Apply => "apply",
        }
    }
}

impl fmt::Display for CommandName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// State of a commit status shown on the pull request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitStatus {
    /// The operation is still running
    Pending,
    /// The operation finished successfully
    Success,
    /// The operation failed
    Failed,
}

impl CommitStatus {
    /// Lowercase status name
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            CommitStatus::Pending => "pending",
            CommitStatus::Success => "success",
            CommitStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for CommitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The invoking command with its free-form arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentCommand {
    /// Which command was invoked
    pub name: CommandName,

    /// Free-form arguments passed after the command name
    pub flags: Vec<String>,
}

impl CommentCommand {
    /// Escape the free-form arguments for safe interpolation into a shell
    ///
    /// Every character is prefixed with a backslash, so the shell receives
    /// each argument as a literal string regardless of metacharacters.
    #[must_use]
    pub fn escaped_flags(&self) -> Vec<String> {
        self.flags
            .iter()
            .map(|flag| {
                let mut escaped = String::with_capacity(flag.len() * 2);
                for ch in flag.chars() {
                    escaped.push('\\');
                    escaped.push(ch);
                }
                escaped
            })
            .collect()
    }
}

/// Identity of the request that triggered a hook run
///
/// Created once per incoming command and consumed read-only by the
/// coordinator. `command` is absent when the trigger carries no comment
/// command (e.g. a pull request update event); hooks with a non-empty
/// command filter are then skipped.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Repository the pull request merges into
    pub base_repo: Repo,

    /// Repository the pull request's head branch lives in
    pub head_repo: Repo,

    /// The triggering pull request
    pub pull: PullRequest,

    /// The invoking user
    pub user: User,

    /// The invoking command, if any
    pub command: Option<CommentCommand>,
}

/// Per-hook execution context
///
/// Derived from a [`RequestContext`] for a single hook invocation and
/// discarded afterwards. `hook_id` is freshly generated for every run and
/// never reused.
#[derive(Debug, Clone)]
pub struct HookExecutionContext {
    /// Repository the pull request merges into
    pub base_repo: Repo,

    /// Repository the pull request's head branch lives in
    pub head_repo: Repo,

    /// The triggering pull request
    pub pull: PullRequest,

    /// The invoking user
    pub user: User,

    /// Name of the invoking command, empty when there is none
    pub command_name: String,

    /// Escaped free-form arguments of the invoking command
    pub escaped_comment_args: Vec<String>,

    /// Globally unique identifier of this hook run
    pub hook_id: String,
}
