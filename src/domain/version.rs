use crate::error::{ChangelogError, Result};
use std::fmt;
use std::str::FromStr;

/// Semantic version representation
///
/// Only the `MAJOR.MINOR.PATCH` triple is modelled. Ordering is numeric per
/// component, so `0.2.1 < 0.11.1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

/// Baseline used when no release exists yet.
pub const DEFAULT_VERSION: Version = Version::new(0, 0, 0);

impl Version {
    /// Create a new version
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Parse an exact `M.m.p` string (e.g., "0.11.2" -> Version(0,11,2))
    ///
    /// Pre-release and build metadata are rejected, as is any prefix such as `v`
    /// and any component with a leading zero (`1.02.0`).
    pub fn parse(s: &str) -> Result<Self> {
        let parsed = semver::Version::parse(s).map_err(|e| {
            ChangelogError::version(format!(
                "Invalid version format: '{}' - expected X.Y.Z ({})",
                s, e
            ))
        })?;

        if !parsed.pre.is_empty() || !parsed.build.is_empty() {
            return Err(ChangelogError::version(format!(
                "Invalid version format: '{}' - pre-release and build metadata are not supported",
                s
            )));
        }

        Ok(Version::new(parsed.major, parsed.minor, parsed.patch))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = ChangelogError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}
