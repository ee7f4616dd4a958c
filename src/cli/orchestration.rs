//! Main workflow orchestration logic
//!
//! Keeps the changelog workflow separate from clap so it can be driven
//! programmatically (and tested) with any [Repository] and [Clock].

use std::path::PathBuf;

use tracing::info;

use crate::changelog::Changelog;
use crate::clock::Clock;
use crate::config::Config;
use crate::domain::{BumpOp, BumpOptions, Version};
use crate::error::{ChangelogError, Result};
use crate::git::{RepoIdentity, Repository};

/// Arguments for the changelog workflow
///
/// Mirrors the CLI Args but in a format suitable for orchestration logic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkflowArgs {
    /// Version bump settings; at most one may be set
    pub bump: BumpOptions,

    /// Create the changelog if it does not exist
    pub init: bool,

    /// With `init`, overwrite an existing changelog
    pub force: bool,

    /// Compute the bump but do not write the file
    pub dry_run: bool,
}

/// A release that was cut (or would be, in a dry run)
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseOutcome {
    /// Latest release before the bump
    pub previous: Option<Version>,

    pub version: Version,

    /// Rendered changelog; only kept for dry runs
    pub preview: Option<String>,
}

/// Result of a successful workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// The changelog that was operated on
    pub path: PathBuf,

    /// Whether a bare changelog was written
    pub created: bool,

    pub release: Option<ReleaseOutcome>,
}

/// Resolve owner and name, preferring explicit configuration over git.
pub fn resolve_identity(repo: &dyn Repository, config: &Config) -> Result<RepoIdentity> {
    let owner = match &config.repository.owner {
        Some(owner) => owner.clone(),
        None => repo.owner(&config.remote)?,
    };
    let name = match &config.repository.name {
        Some(name) => name.clone(),
        None => repo.name()?,
    };
    Ok(RepoIdentity { owner, name })
}

/// The changelog for `repo`, as located and styled by `config`
pub fn open_changelog(repo: &dyn Repository, config: &Config) -> Result<Changelog> {
    let identity = resolve_identity(repo, config)?;
    let path = repo.changelog_path(&config.changelog_file)?;
    Ok(Changelog::with_host(path, &identity, &config.host))
}

/// Main changelog workflow
///
/// 1. Validate the requested bump (at most one option)
/// 2. Resolve the repository identity and changelog path
/// 3. Optionally create a bare changelog
/// 4. Optionally promote Unreleased to a new release
///
/// Nothing is written unless every step before the write succeeded.
pub fn run_workflow(
    args: &WorkflowArgs,
    config: &Config,
    repo: &dyn Repository,
    clock: &dyn Clock,
) -> Result<WorkflowResult> {
    let op = if args.bump.is_empty() {
        if !args.init {
            return Err(ChangelogError::validation(
                "One update option must be specified",
            ));
        }
        None
    } else {
        Some(BumpOp::from_options(&args.bump)?)
    };

    let changelog = open_changelog(repo, config)?;
    info!(path = %changelog.path().display(), "using changelog");

    let created = if args.init && !args.dry_run {
        changelog.create(args.force)?
    } else {
        false
    };

    let release = match op {
        None => None,
        Some(op) if args.dry_run => {
            let preview = changelog.preview(op, clock)?;
            Some(ReleaseOutcome {
                previous: preview.previous,
                version: preview.version,
                preview: Some(preview.text),
            })
        }
        Some(op) => {
            let applied = changelog.apply(op, clock)?;
            Some(ReleaseOutcome {
                previous: applied.previous,
                version: applied.version,
                preview: None,
            })
        }
    };

    Ok(WorkflowResult {
        path: changelog.path().to_path_buf(),
        created,
        release,
    })
}
