use crate::error::{ChangelogError, Result};
use crate::git::Repository;
use std::collections::HashMap;
use std::path::PathBuf;

/// Mock repository for testing without an actual checkout
#[derive(Debug, Clone, Default)]
pub struct MockRepository {
    root: PathBuf,
    remotes: HashMap<String, String>,
}

impl MockRepository {
    /// Create a mock rooted at `root` with no remotes
    pub fn new(root: impl Into<PathBuf>) -> Self {
        MockRepository {
            root: root.into(),
            remotes: HashMap::new(),
        }
    }

    /// Add a remote URL
    pub fn add_remote(&mut self, name: impl Into<String>, url: impl Into<String>) {
        self.remotes.insert(name.into(), url.into());
    }

    /// Builder form of [MockRepository::add_remote]
    pub fn with_remote(mut self, name: impl Into<String>, url: impl Into<String>) -> Self {
        self.add_remote(name, url);
        self
    }
}

impl Repository for MockRepository {
    fn root(&self) -> Result<PathBuf> {
        Ok(self.root.clone())
    }

    fn remote_url(&self, remote: &str) -> Result<String> {
        self.remotes.get(remote).cloned().ok_or_else(|| {
            ChangelogError::no_git_repo(format!("No remote named '{}' found", remote))
        })
    }
}
