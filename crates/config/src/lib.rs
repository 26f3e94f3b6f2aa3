//! Configuration management for prerun
//!
//! This crate handles:
//! - Per-repository pre-workflow hook configuration
//! - Repository identity matching (exact names and `/regex/` patterns)
//! - Loading the global configuration from TOML
//! - Logging initialization

pub mod hooks;
pub mod logging;
pub mod repos;

// Re-export error types from core
pub use prerun_core::{Error, Result};

// Re-export main types
pub use hooks::{DEFAULT_SHELL, DEFAULT_SHELL_ARGS, WorkflowHookConfig};
pub use repos::{GlobalConfig, RepoConfig};
