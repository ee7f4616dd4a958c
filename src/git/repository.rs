use crate::error::{ChangelogError, Result};
use git2::{ErrorCode, Repository as Git2Repo};
use std::path::{Path, PathBuf};

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository at or above `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = Git2Repo::discover(path).map_err(|e| {
            if e.code() == ErrorCode::NotFound {
                ChangelogError::no_git_repo(format!(
                    "Could not find a git repo in '{}'",
                    path.display()
                ))
            } else {
                ChangelogError::Git(e)
            }
        })?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }
}

impl super::Repository for Git2Repository {
    fn root(&self) -> Result<PathBuf> {
        let workdir = self.repo.workdir().ok_or_else(|| {
            ChangelogError::no_git_repo(format!(
                "Repository at '{}' has no working tree",
                self.repo.path().display()
            ))
        })?;

        // workdir() carries a trailing separator; components() drops it
        Ok(workdir.components().collect())
    }

    fn remote_url(&self, remote: &str) -> Result<String> {
        let found = match self.repo.find_remote(remote) {
            Ok(found) => found,
            Err(e) if e.code() == ErrorCode::NotFound => {
                return Err(ChangelogError::no_git_repo(format!(
                    "No remote named '{}' found",
                    remote
                )))
            }
            Err(e) => return Err(ChangelogError::Git(e)),
        };

        found.url().map(str::to_string).ok_or_else(|| {
            ChangelogError::bad_git_url(format!("Remote '{}' has a non UTF-8 url", remote))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::Repository;

    #[test]
    fn test_open_initialized_repository() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("myrepo");
        let git_repo = Git2Repo::init(&root).unwrap();
        git_repo
            .remote("origin", "git@github.com:foo/myrepo.git")
            .unwrap();

        let repo = Git2Repository::open(root.join(".")).unwrap();
        assert_eq!(repo.name().unwrap(), "myrepo");
        assert_eq!(repo.owner("origin").unwrap(), "foo");
        assert_eq!(
            repo.remote_url("origin").unwrap(),
            "git@github.com:foo/myrepo.git"
        );
    }

    #[test]
    fn test_missing_remote_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Git2Repository::from_git2(Git2Repo::init(dir.path()).unwrap());
        assert!(matches!(
            repo.remote_url("upstream"),
            Err(ChangelogError::NoGitRepo(_))
        ));
    }

    #[test]
    fn test_bare_repository_has_no_root() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Git2Repository::from_git2(Git2Repo::init_bare(dir.path()).unwrap());
        assert!(matches!(repo.root(), Err(ChangelogError::NoGitRepo(_))));
    }
}
