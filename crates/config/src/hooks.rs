//! Pre-workflow hook configuration
//!
//! Defines the per-hook configuration entry consumed by the coordinator.
//! Hooks are owned by the repository's static configuration and are
//! read-only during a run.

use prerun_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Shell used when a hook does not configure one
pub const DEFAULT_SHELL: &str = "sh";

/// Shell arguments used when a hook does not configure them
pub const DEFAULT_SHELL_ARGS: &str = "-c";

/// A single pre-workflow hook definition
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowHookConfig {
    /// Display text shown next to the hook's commit status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Command filter: when non-empty, the hook only runs if this string
    /// contains the invoking command's name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commands: Option<String>,

    /// Shell to run the command in (default `sh`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shell: Option<String>,

    /// Arguments passed to the shell before the command (default `-c`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shell_args: Option<String>,

    /// The command text to execute
    pub run_command: String,
}

impl WorkflowHookConfig {
    /// Shell to use, applying the default when unset
    #[must_use]
    pub fn resolved_shell(&self) -> &str {
        match self.shell.as_deref() {
            Some(shell) if !shell.is_empty() => shell,
            _ => DEFAULT_SHELL,
        }
    }

    /// Shell arguments to use, applying the default when unset
    #[must_use]
    pub fn resolved_shell_args(&self) -> &str {
        match self.shell_args.as_deref() {
            Some(args) if !args.is_empty() => args,
            _ => DEFAULT_SHELL_ARGS,
        }
    }

    /// Whether this hook applies to the invoking command
    ///
    /// An empty or absent `commands` filter matches every command. A
    /// non-empty filter matches when it contains `command_name` as a raw
    /// substring: a filter of `"plan,apply"` matches both commands, but so
    /// would `"preplanning"` match `plan`. The substring semantics are part
    /// of the configuration contract and are preserved as-is.
    ///
    /// An empty `command_name` (no invoking command) only matches hooks with
    /// no filter.
    #[must_use]
    pub fn applies_to(&self, command_name: &str) -> bool {
        match self.commands.as_deref() {
            None | Some("") => true,
            Some(_) if command_name.is_empty() => false,
            Some(filter) => filter.contains(command_name),
        }
    }

    /// Validate the hook configuration
    ///
    /// # Errors
    ///
    /// Returns an error if `run_command` is empty or whitespace.
    pub fn validate(&self) -> Result<()> {
        if self.run_command.trim().is_empty() {
            return Err(Error::HookConfig(
                "pre-workflow hook must have a non-empty 'run_command'".to_string(),
            ));
        }
        Ok(())
    }
}
