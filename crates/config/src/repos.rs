//! Repository configuration and identity matching
//!
//! The global configuration holds one entry per repository (or per group of
//! repositories, via a regex pattern); each entry owns the ordered list of
//! pre-workflow hooks that apply to matching repositories.
//!
//! Example:
//! ```toml
//! [[repos]]
//! id = "octocat/hello-world"
//! [[repos.pre_workflow_hooks]]
//! description = "lint"
//! run_command = "./lint.sh"
//!
//! [[repos]]
//! id = "/.*-infra$/"
//! [[repos.pre_workflow_hooks]]
//! run_command = "make generate"
//! ```

use crate::hooks::WorkflowHookConfig;
use prerun_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration entry for one repository identity pattern
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepoConfig {
    /// Repository identity: an exact full name (`owner/name`), or a regex
    /// when wrapped in slashes (`/pattern/`)
    pub id: String,

    /// Pre-workflow hooks to run for matching repositories, in order
    #[serde(default)]
    pub pre_workflow_hooks: Vec<WorkflowHookConfig>,
}

impl RepoConfig {
    /// Whether this entry's identity pattern matches the given repository ID
    ///
    /// Exact string comparison for plain IDs; unanchored regex matching for
    /// `/pattern/` IDs. An invalid regex never matches (`validate` reports
    /// it at load time).
    #[must_use]
    pub fn id_matches(&self, repo_id: &str) -> bool {
        match self.regex_pattern() {
            Some(pattern) => regex::Regex::new(pattern)
                .map(|re| re.is_match(repo_id))
                .unwrap_or(false),
            None => self.id == repo_id,
        }
    }

    /// Validate the entry and all of its hooks
    ///
    /// # Errors
    ///
    /// Returns an error on an empty ID, an invalid `/regex/` pattern, or an
    /// invalid hook.
    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(Error::HookConfig(
                "repository configuration entry must have an 'id'".to_string(),
            ));
        }

        if let Some(pattern) = self.regex_pattern() {
            regex::Regex::new(pattern).map_err(|e| {
                Error::HookConfig(format!("invalid repository ID regex '{}': {e}", self.id))
            })?;
        }

        for hook in &self.pre_workflow_hooks {
            hook.validate()?;
        }

        Ok(())
    }

    /// The regex body when the ID is slash-delimited
    fn regex_pattern(&self) -> Option<&str> {
        self.id
            .strip_prefix('/')
            .and_then(|rest| rest.strip_suffix('/'))
            .filter(|pattern| !pattern.is_empty())
    }
}

/// The complete repository configuration consumed by the coordinator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Repository entries in configuration order
    #[serde(default)]
    pub repos: Vec<RepoConfig>,
}

impl GlobalConfig {
    /// Load and validate the configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::HookConfig(format!("failed to read config {}: {e}", path.display()))
        })?;

        let config: GlobalConfig = toml::from_str(&content).map_err(|e| {
            Error::HookConfig(format!("failed to parse config {}: {e}", path.display()))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate every repository entry
    ///
    /// # Errors
    ///
    /// Returns the first entry or hook validation error.
    pub fn validate(&self) -> Result<()> {
        for repo in &self.repos {
            repo.validate()?;
        }
        Ok(())
    }
}
