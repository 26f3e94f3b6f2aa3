//! Core types for prerun
//!
//! This is the foundation crate (Layer 0) that all other prerun crates depend on.
//! It provides:
//! - Base error types
//! - Domain models (repositories, pull requests, commands, commit statuses)
//! - Capability traits for the external collaborators (locking, workspace
//!   materialization, status reporting, hook execution, URL generation)
//!
//! This crate has no dependencies on other prerun crates.

pub mod error;
pub mod models;
pub mod traits;

pub use error::{Error, Result};
pub use models::{
    CommandName, CommentCommand, CommitStatus, HookExecutionContext, PullRequest, Repo,
    RequestContext, User,
};
pub use traits::{
    ClonedRepo, CommitStatusUpdater, HookExecutor, HookOutput, HookUrlGenerator, WorkingDir,
    WorkingDirLocker, WorkspaceLock,
};
