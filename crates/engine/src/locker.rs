//! Working directory locking
//!
//! Serializes all workspace-mutating operations against the same logical
//! checkout. One lock covers a whole hook run; two concurrent triggers for
//! the same pull request contend on the same key.

use prerun_core::traits::{WorkingDirLocker, WorkspaceLock};
use prerun_core::{Error, Result};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// In-process, non-blocking [`WorkingDirLocker`]
///
/// Locks live in a shared table keyed by repository, pull number, workspace
/// and directory. `try_lock` fails immediately when the key is held; the
/// returned guard removes the key when dropped.
#[derive(Debug, Clone, Default)]
pub struct DefaultWorkingDirLocker {
    locks: Arc<Mutex<HashSet<String>>>,
}

impl DefaultWorkingDirLocker {
    /// Create a locker with an empty lock table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn key(repo_full_name: &str, pull_num: u64, workspace: &str, path: &str) -> String {
        format!("{repo_full_name}/{pull_num}/{workspace}/{path}")
    }
}

impl WorkingDirLocker for DefaultWorkingDirLocker {
    fn try_lock(
        &self,
        repo_full_name: &str,
        pull_num: u64,
        workspace: &str,
        path: &str,
    ) -> Result<WorkspaceLock> {
        let key = Self::key(repo_full_name, pull_num, workspace, path);

        {
            let mut locks = self.locks.lock().unwrap();
            if !locks.insert(key.clone()) {
                return Err(Error::Lock(format!(
                    "the {workspace} workspace at {path} is currently in use by another \
                     operation for pull {pull_num} in {repo_full_name}"
                )));
            }
        }

        let table = Arc::clone(&self.locks);
        Ok(WorkspaceLock::new(move || {
            if let Ok(mut locks) = table.lock() {
                locks.remove(&key);
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_lock_and_release() {
        let locker = DefaultWorkingDirLocker::new();

        let lock = locker.try_lock("acme/app", 1, "default", ".").unwrap();
        drop(lock);

        // Released on drop, so a second acquisition succeeds
        assert!(locker.try_lock("acme/app", 1, "default", ".").is_ok());
    }

    #[test]
    fn test_contention_on_same_key() {
        let locker = DefaultWorkingDirLocker::new();

        let _held = locker.try_lock("acme/app", 1, "default", ".").unwrap();
        let err = locker.try_lock("acme/app", 1, "default", ".").unwrap_err();
        assert!(err.to_string().contains("in use"));
    }

    #[test]
    fn test_distinct_keys_do_not_contend() {
        let locker = DefaultWorkingDirLocker::new();

        let _a = locker.try_lock("acme/app", 1, "default", ".").unwrap();
        assert!(locker.try_lock("acme/app", 2, "default", ".").is_ok());
        assert!(locker.try_lock("acme/other", 1, "default", ".").is_ok());
        assert!(locker.try_lock("acme/app", 1, "staging", ".").is_ok());
    }

    #[test]
    fn test_failed_acquisition_requires_no_release() {
        let locker = DefaultWorkingDirLocker::new();

        let held = locker.try_lock("acme/app", 1, "default", ".").unwrap();
        let _ = locker.try_lock("acme/app", 1, "default", ".").unwrap_err();

        // The original holder still owns the key
        drop(held);
        assert!(locker.try_lock("acme/app", 1, "default", ".").is_ok());
    }
}
