use crate::domain::section::SectionKind;
use crate::domain::version::Version;
use crate::error::{ChangelogError, Result};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

/// Sentinel key of the pending-changes release.
pub const UNRELEASED: &str = "Unreleased";

/// Key of a release heading: either `Unreleased` or a concrete version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReleaseKey {
    Unreleased,
    Version(Version),
}

impl ReleaseKey {
    pub fn is_unreleased(&self) -> bool {
        matches!(self, ReleaseKey::Unreleased)
    }

    pub fn version(&self) -> Option<Version> {
        match self {
            ReleaseKey::Unreleased => None,
            ReleaseKey::Version(v) => Some(*v),
        }
    }
}

impl fmt::Display for ReleaseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseKey::Unreleased => f.write_str(UNRELEASED),
            ReleaseKey::Version(v) => v.fmt(f),
        }
    }
}

impl FromStr for ReleaseKey {
    type Err = ChangelogError;

    fn from_str(s: &str) -> Result<Self> {
        if s == UNRELEASED {
            Ok(ReleaseKey::Unreleased)
        } else {
            Version::parse(s).map(ReleaseKey::Version)
        }
    }
}

impl From<Version> for ReleaseKey {
    fn from(version: Version) -> Self {
        ReleaseKey::Version(version)
    }
}

/// A single release: optional date plus its section line blocks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Release {
    /// `YYYY-MM-DD`; never rendered for Unreleased
    pub date: Option<String>,
    /// Iterates in canonical section order regardless of insertion order
    pub sections: BTreeMap<SectionKind, Vec<String>>,
}

impl Release {
    pub fn new(date: Option<String>) -> Self {
        Release {
            date,
            sections: BTreeMap::new(),
        }
    }

    /// Fresh Unreleased skeleton: every section present and empty
    pub fn bare_unreleased() -> Self {
        Release {
            date: None,
            sections: SectionKind::ALL
                .into_iter()
                .map(|kind| (kind, Vec::new()))
                .collect(),
        }
    }

    /// Builder-style helper mostly used when assembling models by hand
    pub fn with_section<I, S>(mut self, kind: SectionKind, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sections
            .insert(kind, lines.into_iter().map(Into::into).collect());
        self
    }
}

/// Parsed representation of a whole changelog document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeData {
    /// Free-form prose between the title line and the first release
    pub header: Vec<String>,
    pub releases: HashMap<ReleaseKey, Release>,
}

impl ChangeData {
    pub fn new(header: Vec<String>, releases: HashMap<ReleaseKey, Release>) -> Self {
        ChangeData { header, releases }
    }

    /// Content of a fresh changelog: the standard header and an empty Unreleased release
    pub fn bare() -> Self {
        let header = vec![
            "All notable changes to this project will be documented in this file.".to_string(),
            String::new(),
            "The format is based on [Keep a Changelog](http://keepachangelog.com/)".to_string(),
            "and this project adheres to [Semantic Versioning](http://semver.org/).".to_string(),
        ];
        let mut releases = HashMap::new();
        releases.insert(ReleaseKey::Unreleased, Release::bare_unreleased());
        ChangeData { header, releases }
    }

    /// Highest released version, if any release has been cut
    pub fn latest_version(&self) -> Option<Version> {
        self.releases.keys().filter_map(ReleaseKey::version).max()
    }
}

/// Drop trailing blank (empty or whitespace-only) lines from a block.
///
/// An all-blank block becomes empty.
pub fn trim_trailing_blank(mut lines: Vec<String>) -> Vec<String> {
    let keep = lines
        .iter()
        .rposition(|line| !line.trim().is_empty())
        .map_or(0, |last| last + 1);
    lines.truncate(keep);
    lines
}
