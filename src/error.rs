use thiserror::Error;

use crate::changelog::parser::ParseError;

/// Unified error type for changelog operations
#[derive(Error, Debug)]
pub enum ChangelogError {
    #[error("Changelog parse failed: {0}")]
    Parse(#[from] ParseError),

    #[error("Invalid update: {0}")]
    Validation(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("No git repository: {0}")]
    NoGitRepo(String),

    #[error("Bad git remote URL: {0}")]
    BadGitUrl(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in keepachangelog-manager
pub type Result<T> = std::result::Result<T, ChangelogError>;

impl ChangelogError {
    /// Create a validation error with context
    pub fn validation(msg: impl Into<String>) -> Self {
        ChangelogError::Validation(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ChangelogError::Version(msg.into())
    }

    /// Create a missing-repository error with context
    pub fn no_git_repo(msg: impl Into<String>) -> Self {
        ChangelogError::NoGitRepo(msg.into())
    }

    /// Create a bad remote URL error with context
    pub fn bad_git_url(msg: impl Into<String>) -> Self {
        ChangelogError::BadGitUrl(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ChangelogError::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::changelog::parser::ParseState;

    #[test]
    fn test_error_display() {
        let err = ChangelogError::config("test config issue");
        assert_eq!(err.to_string(), "Configuration error: test config issue");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ChangelogError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_error_from_parse() {
        let parse_err = ParseError::IllegalTransition {
            line: 3,
            from: ParseState::Header,
            to: ParseState::Section,
        };
        let err: ChangelogError = parse_err.into();
        let msg = err.to_string();
        assert!(msg.starts_with("Changelog parse failed"));
        assert!(msg.contains("line 3"));
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (ChangelogError::validation("x"), "Invalid update"),
            (ChangelogError::version("x"), "Version parsing error"),
            (ChangelogError::no_git_repo("x"), "No git repository"),
            (ChangelogError::bad_git_url("x"), "Bad git remote URL"),
            (ChangelogError::config("x"), "Configuration error"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }
}
