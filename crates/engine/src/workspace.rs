//! Workspace materialization
//!
//! Provides the default [`WorkingDir`] implementation: a git2-based clone of
//! the pull request's head branch into a managed directory tree under a data
//! directory, one checkout per (repository, pull, workspace).

use prerun_core::models::{PullRequest, Repo};
use prerun_core::traits::{ClonedRepo, WorkingDir};
use prerun_core::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Helper function to convert git2 errors to prerun errors
#[inline]
#[allow(clippy::needless_pass_by_value)]
fn git_err(e: git2::Error) -> Error {
    Error::Workspace(format!("git error: {e}"))
}

/// git2-backed [`WorkingDir`]
///
/// Checkouts live under `<data_dir>/repos/<full_name>/<pull_num>/<workspace>`.
/// An existing checkout is removed and freshly cloned; incremental refresh of
/// a prior checkout belongs to a richer provider behind the same trait.
#[derive(Debug, Clone)]
pub struct GitWorkspace {
    data_dir: PathBuf,
}

impl GitWorkspace {
    /// Create a workspace provider rooted at the given data directory
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Directory a checkout for the given pull and workspace lives in
    #[must_use]
    pub fn workspace_dir(&self, repo: &Repo, pull: &PullRequest, workspace: &str) -> PathBuf {
        self.data_dir
            .join("repos")
            .join(&repo.full_name)
            .join(pull.num.to_string())
            .join(workspace)
    }

    fn clone_branch(&self, repo: &Repo, branch: &str, dir: &Path) -> Result<()> {
        tracing::debug!(
            url = %repo.clone_url,
            %branch,
            dir = %dir.display(),
            "cloning head branch"
        );

        let mut builder = git2::build::RepoBuilder::new();
        builder.branch(branch);
        builder.clone(&repo.clone_url, dir).map_err(git_err)?;
        Ok(())
    }
}

impl WorkingDir for GitWorkspace {
    fn clone_repo(
        &self,
        head_repo: &Repo,
        pull: &PullRequest,
        workspace: &str,
    ) -> Result<ClonedRepo> {
        let dir = self.workspace_dir(head_repo, pull, workspace);

        let recloned = dir.exists();
        if recloned {
            tracing::debug!(dir = %dir.display(), "removing stale checkout");
            fs::remove_dir_all(&dir).map_err(|e| {
                Error::Workspace(format!(
                    "failed to remove stale checkout {}: {e}",
                    dir.display()
                ))
            })?;
        }

        if let Some(parent) = dir.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Workspace(format!(
                    "failed to create workspace parent {}: {e}",
                    parent.display()
                ))
            })?;
        }

        self.clone_branch(head_repo, &pull.head_branch, &dir)?;

        Ok(ClonedRepo { dir, recloned })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;

    /// Build a local git repository with one commit and a `feature` branch
    fn init_source_repo(dir: &Path) {
        let repo = git2::Repository::init(dir).unwrap();

        fs::write(dir.join("README.md"), "# source\n").unwrap();
        let mut index = repo.index().unwrap();
        index.add_path(Path::new("README.md")).unwrap();
        index.write().unwrap();
        let tree_id = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();

        let sig = git2::Signature::now("tester", "tester@example.com").unwrap();
        let commit_id = repo
            .commit(Some("HEAD"), &sig, &sig, "initial commit", &tree, &[])
            .unwrap();

        let commit = repo.find_commit(commit_id).unwrap();
        repo.branch("feature", &commit, true).unwrap();
    }

    fn head_repo(source: &Path) -> Repo {
        Repo {
            full_name: "fork/app".to_string(),
            owner: "fork".to_string(),
            name: "app".to_string(),
            clone_url: source.display().to_string(),
        }
    }

    fn pull() -> PullRequest {
        PullRequest {
            num: 42,
            head_branch: "feature".to_string(),
            base_branch: "main".to_string(),
            author: "octocat".to_string(),
        }
    }

    #[test]
    fn test_clone_repo_materializes_head_branch() {
        let source = tempfile::tempdir().unwrap();
        init_source_repo(source.path());
        let data = tempfile::tempdir().unwrap();

        let workspace = GitWorkspace::new(data.path());
        let cloned = workspace
            .clone_repo(&head_repo(source.path()), &pull(), "default")
            .unwrap();

        assert!(!cloned.recloned);
        assert!(cloned.dir.join("README.md").exists());
        assert!(cloned.dir.ends_with("repos/fork/app/42/default"));

        let checkout = git2::Repository::open(&cloned.dir).unwrap();
        let head = checkout.head().unwrap();
        assert_eq!(head.shorthand(), Some("feature"));
    }

    #[test]
    fn test_clone_repo_replaces_existing_checkout() {
        let source = tempfile::tempdir().unwrap();
        init_source_repo(source.path());
        let data = tempfile::tempdir().unwrap();

        let workspace = GitWorkspace::new(data.path());
        let first = workspace
            .clone_repo(&head_repo(source.path()), &pull(), "default")
            .unwrap();
        fs::write(first.dir.join("scratch.txt"), "local edits").unwrap();

        let second = workspace
            .clone_repo(&head_repo(source.path()), &pull(), "default")
            .unwrap();

        assert!(second.recloned);
        assert!(!second.dir.join("scratch.txt").exists());
    }

    #[test]
    fn test_clone_repo_unknown_branch_fails() {
        let source = tempfile::tempdir().unwrap();
        init_source_repo(source.path());
        let data = tempfile::tempdir().unwrap();

        let mut missing = pull();
        missing.head_branch = "does-not-exist".to_string();

        let workspace = GitWorkspace::new(data.path());
        let err = workspace
            .clone_repo(&head_repo(source.path()), &missing, "default")
            .unwrap_err();
        assert!(err.to_string().contains("git error"));
    }
}
