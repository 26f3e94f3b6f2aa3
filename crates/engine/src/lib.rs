//! # Prerun Engine
//!
//! Coordinator for pre-workflow hooks: shell commands configured per
//! repository that must run before a plan/apply command is processed against
//! a pull request.
//!
//! The engine provides:
//!
//! - **Coordinator**: hook selection, lock-scoped workspace access, ordered
//!   execution with fail-fast semantics, per-hook status reporting
//! - **Selector**: filters configured hooks down to the current repository
//! - **Executor**: runs one hook's command in a named shell via duct
//! - **Locker**: in-process working directory locking
//! - **Workspace**: git2-based materialization of the request's head branch
//!
//! The external collaborators (lock, workspace, status reporting, execution,
//! URL generation) are consumed through the capability traits defined in
//! `prerun-core`; the implementations here are defaults, not requirements.

pub mod coordinator;
pub mod executor;
pub mod locker;
pub mod selector;
pub mod status;
pub mod url;
pub mod workspace;

// Re-export error types from core
pub use prerun_core::{Error, Result};

// Re-export commonly used types
pub use coordinator::{DEFAULT_REPO_REL_DIR, DEFAULT_WORKSPACE, PreWorkflowHookCoordinator};
pub use executor::ShellHookExecutor;
pub use locker::DefaultWorkingDirLocker;
pub use status::NoopStatusUpdater;
pub use url::Router;
pub use workspace::GitWorkspace;
