//! Hook selection
//!
//! Filters the repository configuration down to the hooks that apply to the
//! current request's base repository.

use prerun_config::{RepoConfig, WorkflowHookConfig};
use prerun_core::models::Repo;

/// Select the pre-workflow hooks configured for the given base repository
///
/// Returns the ordered concatenation of `pre_workflow_hooks` from every
/// configuration entry whose identity pattern matches the base repository. A
/// repository may match more than one entry; all matching entries' hooks are
/// appended in configuration order. Returns an empty list, never an error,
/// when nothing matches or matching entries define no hooks.
#[must_use]
pub fn select_hooks(repos: &[RepoConfig], base_repo: &Repo) -> Vec<WorkflowHookConfig> {
    let mut hooks = Vec::new();
    for repo in repos {
        if repo.id_matches(base_repo.id()) && !repo.pre_workflow_hooks.is_empty() {
            hooks.extend(repo.pre_workflow_hooks.iter().cloned());
        }
    }
    hooks
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;

    fn hook(run_command: &str) -> WorkflowHookConfig {
        WorkflowHookConfig {
            run_command: run_command.to_string(),
            ..WorkflowHookConfig::default()
        }
    }

    fn repo(full_name: &str) -> Repo {
        Repo {
            full_name: full_name.to_string(),
            owner: full_name.split('/').next().unwrap_or("").to_string(),
            name: full_name.split('/').nth(1).unwrap_or("").to_string(),
            clone_url: format!("https://example.com/{full_name}.git"),
        }
    }

    #[test]
    fn test_no_matching_entry() {
        let repos = vec![RepoConfig {
            id: "acme/other".to_string(),
            pre_workflow_hooks: vec![hook("echo a")],
        }];

        assert!(select_hooks(&repos, &repo("acme/app")).is_empty());
    }

    #[test]
    fn test_matching_entry_without_hooks() {
        let repos = vec![RepoConfig {
            id: "acme/app".to_string(),
            pre_workflow_hooks: vec![],
        }];

        assert!(select_hooks(&repos, &repo("acme/app")).is_empty());
    }

    #[test]
    fn test_multiple_matching_entries_concatenate_in_order() {
        let repos = vec![
            RepoConfig {
                id: "/^acme//".to_string(),
                pre_workflow_hooks: vec![hook("echo org-wide")],
            },
            RepoConfig {
                id: "acme/app".to_string(),
                pre_workflow_hooks: vec![hook("echo first"), hook("echo second")],
            },
        ];

        let selected = select_hooks(&repos, &repo("acme/app"));
        let commands: Vec<&str> = selected.iter().map(|h| h.run_command.as_str()).collect();
        assert_eq!(commands, vec!["echo org-wide", "echo first", "echo second"]);
    }

    #[test]
    fn test_selection_preserves_configured_order() {
        let repos = vec![RepoConfig {
            id: "acme/app".to_string(),
            pre_workflow_hooks: vec![hook("a"), hook("b"), hook("c")],
        }];

        let selected = select_hooks(&repos, &repo("acme/app"));
        let commands: Vec<&str> = selected.iter().map(|h| h.run_command.as_str()).collect();
        assert_eq!(commands, vec!["a", "b", "c"]);
    }
}
