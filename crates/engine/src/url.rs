//! Progress URL generation
//!
//! Maps a hook run identifier to a link the platform can show next to the
//! hook's commit status.

use prerun_core::traits::HookUrlGenerator;
use prerun_core::{Error, Result};

/// Formats per-hook progress URLs from a configured base URL
#[derive(Debug, Clone)]
pub struct Router {
    base_url: String,
}

impl Router {
    /// Create a router serving links under the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl HookUrlGenerator for Router {
    fn generate_hook_url(&self, hook_id: &str) -> Result<String> {
        if self.base_url.is_empty() {
            return Err(Error::UrlGeneration(
                "no base URL configured for hook progress links".to_string(),
            ));
        }

        Ok(format!(
            "{}/hooks/{hook_id}",
            self.base_url.trim_end_matches('/')
        ))
    }
}
