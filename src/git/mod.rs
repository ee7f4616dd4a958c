//! Repository identity abstraction layer
//!
//! The changelog footer links point at `https://<host>/<owner>/<name>`. This
//! module answers "who owns this repository and what is it called" behind the
//! [Repository] trait, so the changelog core only ever sees two strings.
//!
//! - [repository::Git2Repository]: reads the working tree and remotes using the `git2` crate
//! - [mock::MockRepository]: in-memory implementation for testing
//!
//! ```rust
//! # use keepachangelog_manager::git::{MockRepository, RepoIdentity};
//! let repo = MockRepository::new("/src/myrepo")
//!     .with_remote("origin", "git@github.com:foo/myrepo.git");
//! let identity = RepoIdentity::discover(&repo, "origin").unwrap();
//! assert_eq!(identity.owner, "foo");
//! assert_eq!(identity.name, "myrepo");
//! ```

pub mod mock;
pub mod remote;
pub mod repository;

pub use mock::MockRepository;
pub use remote::owner_from_git_url;
pub use repository::Git2Repository;

use crate::error::{ChangelogError, Result};
use std::path::PathBuf;

/// Owner and name of a hosted repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoIdentity {
    pub owner: String,
    pub name: String,
}

impl RepoIdentity {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        RepoIdentity {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Derive the identity from a repository's root directory and remote URL
    pub fn discover<R: Repository + ?Sized>(repo: &R, remote: &str) -> Result<Self> {
        Ok(RepoIdentity {
            owner: repo.owner(remote)?,
            name: repo.name()?,
        })
    }
}

/// Read-only view of a local git checkout
///
/// Implementors only supply the raw facts ([Repository::root] and
/// [Repository::remote_url]); the derived values have default implementations.
pub trait Repository {
    /// Root of the working tree
    ///
    /// # Returns
    /// * `Ok(PathBuf)` - Absolute path of the working tree root
    /// * `Err(NoGitRepo)` - If the repository has no working tree
    fn root(&self) -> Result<PathBuf>;

    /// URL configured for a remote (e.g., "origin")
    ///
    /// # Returns
    /// * `Ok(String)` - The fetch URL exactly as configured
    /// * `Err(NoGitRepo)` - If no such remote exists
    fn remote_url(&self, remote: &str) -> Result<String>;

    /// Repository name, taken to be the name of the root directory
    fn name(&self) -> Result<String> {
        let root = self.root()?;
        root.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                ChangelogError::no_git_repo(format!(
                    "Cannot derive a repository name from '{}'",
                    root.display()
                ))
            })
    }

    /// Repository owner, parsed from the remote URL
    fn owner(&self, remote: &str) -> Result<String> {
        let url = self.remote_url(remote)?;
        owner_from_git_url(&url)
    }

    /// Location of the changelog file inside the working tree
    fn changelog_path(&self, file_name: &str) -> Result<PathBuf> {
        Ok(self.root()?.join(file_name))
    }
}
