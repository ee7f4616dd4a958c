//! Reading, transforming and writing a `CHANGELOG.md`.
//!
//! - `parser` - text to [ChangeData]
//! - `render` - [ChangeData] to text
//! - `order` - display order of release keys
//!
//! [Changelog] ties these to a file on disk: every operation does a full
//! read, an in-memory transform and a full overwrite, so a failure at any
//! step leaves the file as it was.

pub mod order;
pub mod parser;
pub mod render;

pub use order::version_order;
pub use parser::{ParseError, ParseState, Parser};
pub use render::Renderer;

use crate::clock::Clock;
use crate::domain::{BumpOp, ChangeData, Version};
use crate::error::Result;
use crate::git::RepoIdentity;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A changelog file belonging to one repository
#[derive(Debug, Clone)]
pub struct Changelog {
    path: PathBuf,
    parser: Parser,
    renderer: Renderer,
}

/// Outcome of a bump that has not been written yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    /// Latest release before the bump
    pub previous: Option<Version>,
    pub version: Version,
    pub text: String,
}

impl Changelog {
    /// Changelog at `path` for a github.com repository
    pub fn new(path: impl Into<PathBuf>, identity: &RepoIdentity) -> Self {
        Changelog::with_host(path, identity, render::DEFAULT_HOST)
    }

    /// Changelog at `path` whose compare links live on `host`
    pub fn with_host(path: impl Into<PathBuf>, identity: &RepoIdentity, host: &str) -> Self {
        Changelog {
            path: path.into(),
            parser: Parser::new(),
            renderer: Renderer::new(identity, host),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Text of a fresh, empty changelog
    pub fn bare(&self) -> String {
        self.renderer.render(&ChangeData::bare())
    }

    pub fn parse(&self, text: &str) -> Result<ChangeData> {
        Ok(self.parser.parse(text)?)
    }

    pub fn render(&self, data: &ChangeData) -> String {
        self.renderer.render(data)
    }

    pub fn render_lines(&self, data: &ChangeData) -> Vec<String> {
        self.renderer.render_lines(data)
    }

    /// Read and parse the file
    pub fn parse_file(&self) -> Result<ChangeData> {
        let text = self.read()?;
        self.parse(&text)
    }

    /// Write a bare changelog unless one already exists.
    ///
    /// With `force` an existing file is overwritten. Returns whether the file was written.
    pub fn create(&self, force: bool) -> Result<bool> {
        if self.exists() && !force {
            debug!(path = %self.path.display(), "changelog exists, not overwriting");
            return Ok(false);
        }
        self.write(&self.bare())?;
        info!(path = %self.path.display(), "created changelog");
        Ok(true)
    }

    /// Compute the bumped changelog without touching the file
    pub fn preview(&self, op: BumpOp, clock: &dyn Clock) -> Result<Preview> {
        let mut data = self.parse_file()?;
        let previous = data.latest_version();
        let version = data.update(op, clock)?;
        Ok(Preview {
            previous,
            version,
            text: self.render(&data),
        })
    }

    /// Promote Unreleased into a new release and rewrite the file. Returns the new version.
    pub fn update(&self, op: BumpOp, clock: &dyn Clock) -> Result<Version> {
        self.apply(op, clock).map(|applied| applied.version)
    }

    /// Same as [Changelog::update], returning everything that was written
    pub fn apply(&self, op: BumpOp, clock: &dyn Clock) -> Result<Preview> {
        let preview = self.preview(op, clock)?;
        self.write(&preview.text)?;
        info!(path = %self.path.display(), version = %preview.version, "updated changelog");
        Ok(preview)
    }

    fn read(&self) -> Result<String> {
        fs::read_to_string(&self.path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                io::Error::new(
                    e.kind(),
                    format!(
                        "{} not found (create it with --init)",
                        self.path.display()
                    ),
                )
                .into()
            } else {
                e.into()
            }
        })
    }

    /// Write to a sibling temp file, then rename over the target.
    ///
    /// A symlinked changelog is written through to the file it points at, and
    /// the existing file's permissions carry over to the new contents.
    fn write(&self, text: &str) -> Result<()> {
        let target = match fs::canonicalize(&self.path) {
            Ok(resolved) => resolved,
            Err(e) if e.kind() == io::ErrorKind::NotFound => self.path.clone(),
            Err(e) => return Err(e.into()),
        };
        let permissions = fs::metadata(&target).ok().map(|meta| meta.permissions());

        let mut tmp_name = target
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        tmp_name.push(".tmp");
        let tmp = target.with_file_name(tmp_name);

        fs::write(&tmp, text)?;
        let replaced = permissions
            .map_or(Ok(()), |permissions| fs::set_permissions(&tmp, permissions))
            .and_then(|()| fs::rename(&tmp, &target));
        if let Err(e) = replaced {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        debug!(path = %target.display(), bytes = text.len(), "wrote changelog");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::error::ChangelogError;

    fn changelog_in(dir: &Path) -> Changelog {
        Changelog::new(dir.join("CHANGELOG.md"), &RepoIdentity::new("foo", "myrepo"))
    }

    #[test]
    fn test_create_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let changelog = changelog_in(dir.path());
        assert!(!changelog.exists());
        assert!(changelog.create(false).unwrap());
        assert_eq!(
            fs::read_to_string(changelog.path()).unwrap(),
            changelog.bare()
        );
    }

    #[test]
    fn test_create_does_not_clobber_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let changelog = changelog_in(dir.path());
        fs::write(changelog.path(), "keep me").unwrap();

        assert!(!changelog.create(false).unwrap());
        assert_eq!(fs::read_to_string(changelog.path()).unwrap(), "keep me");

        assert!(changelog.create(true).unwrap());
        assert_eq!(
            fs::read_to_string(changelog.path()).unwrap(),
            changelog.bare()
        );
    }

    #[test]
    fn test_bare_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let changelog = changelog_in(dir.path());
        let bare = changelog.bare();
        let data = changelog.parse(&bare).unwrap();
        assert_eq!(data, ChangeData::bare());
        assert_eq!(changelog.render(&data), bare);
    }

    #[test]
    fn test_update_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let changelog = changelog_in(dir.path());
        let err = changelog
            .update(BumpOp::IncrementPatch, &FixedClock::new("2019-01-23"))
            .unwrap_err();
        assert!(matches!(err, ChangelogError::Io(_)));
        assert!(err.to_string().contains("--init"));
    }

    #[test]
    fn test_failed_update_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let changelog = changelog_in(dir.path());
        let broken = "# Change Log\n## [Unreleased]\n### Foo\n";
        fs::write(changelog.path(), broken).unwrap();

        assert!(changelog
            .update(BumpOp::IncrementPatch, &FixedClock::new("2019-01-23"))
            .is_err());
        assert_eq!(fs::read_to_string(changelog.path()).unwrap(), broken);
        assert!(!dir.path().join("CHANGELOG.md.tmp").exists());
    }

    #[test]
    fn test_preview_does_not_write() {
        let dir = tempfile::tempdir().unwrap();
        let changelog = changelog_in(dir.path());
        changelog.create(false).unwrap();

        let preview = changelog
            .preview(BumpOp::IncrementMinor, &FixedClock::new("2019-01-23"))
            .unwrap();
        assert_eq!(preview.previous, None);
        assert_eq!(preview.version, Version::new(0, 1, 0));
        assert!(preview.text.contains("## [0.1.0] - 2019-01-23"));
        assert_eq!(
            fs::read_to_string(changelog.path()).unwrap(),
            changelog.bare()
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_update_writes_through_symlink() {
        use std::os::unix::fs::symlink;

        let dir = tempfile::tempdir().unwrap();
        let real = dir.path().join("docs");
        fs::create_dir(&real).unwrap();
        let changelog = changelog_in(dir.path());
        let real_file = real.join("CHANGELOG.md");
        fs::write(&real_file, changelog.bare()).unwrap();
        symlink(&real_file, changelog.path()).unwrap();

        changelog
            .update(BumpOp::IncrementPatch, &FixedClock::new("2019-01-23"))
            .unwrap();

        let link = fs::symlink_metadata(changelog.path()).unwrap();
        assert!(link.file_type().is_symlink());
        assert!(fs::read_to_string(&real_file)
            .unwrap()
            .contains("## [0.0.1] - 2019-01-23"));
        assert!(!real.join("CHANGELOG.md.tmp").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_update_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let changelog = changelog_in(dir.path());
        changelog.create(false).unwrap();
        fs::set_permissions(changelog.path(), fs::Permissions::from_mode(0o640)).unwrap();

        changelog
            .update(BumpOp::IncrementMinor, &FixedClock::new("2019-01-23"))
            .unwrap();

        let mode = fs::metadata(changelog.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o640);
    }
}
