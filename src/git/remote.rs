use crate::error::{ChangelogError, Result};
use regex::Regex;
use std::sync::LazyLock;

// [scheme://][user@]host[:port](:|/)owner/repo[.git][/]
static REMOTE_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[a-z][a-z0-9+.-]*://)?(?:[^@/\s]+@)?[^:/\s]+(?::\d+)?[:/]([^/\s]+)/[^/\s]+?(?:\.git)?/?$")
        .expect("Invalid remote URL regex")
});

/// Extract the owner from a git remote URL.
///
/// Handles the scp-like form (`git@github.com:owner/repo.git`) as well as
/// `https://`, `ssh://` and `git://` URLs.
///
/// # Example
/// ```
/// # use keepachangelog_manager::git::owner_from_git_url;
/// assert_eq!(owner_from_git_url("git@github.com:torvalds/linux.git").unwrap(), "torvalds");
/// assert!(owner_from_git_url("aw3ta46").is_err());
/// ```
pub fn owner_from_git_url(url: &str) -> Result<String> {
    let url = url.trim();
    REMOTE_URL_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|owner| owner.as_str().to_string())
        .ok_or_else(|| {
            ChangelogError::bad_git_url(format!("Could not parse '{}' as a git url", url))
        })
}
