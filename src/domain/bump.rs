//! Version bump instructions and their application to a changelog model.

use crate::clock::Clock;
use crate::domain::release::{ChangeData, Release, ReleaseKey};
use crate::domain::version::{Version, DEFAULT_VERSION};
use crate::error::{ChangelogError, Result};
use std::fmt;
use tracing::{debug, info};

/// Exactly one version-bump instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumpOp {
    IncrementPatch,
    IncrementMinor,
    IncrementMajor,
    SetPatch(u64),
    SetMinor(u64),
    SetMajor(u64),
}

/// The loose "one of N optional settings" form, as collected from command-line flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BumpOptions {
    pub increment_patch: bool,
    pub increment_minor: bool,
    pub increment_major: bool,
    pub patch: Option<u64>,
    pub minor: Option<u64>,
    pub major: Option<u64>,
}

impl BumpOptions {
    /// Whether any bump setting was supplied at all
    pub fn is_empty(&self) -> bool {
        *self == BumpOptions::default()
    }
}

impl BumpOp {
    /// Collapse loose options into a single instruction.
    ///
    /// Fails unless exactly one option is set.
    pub fn from_options(options: &BumpOptions) -> Result<Self> {
        let candidates: Vec<BumpOp> = [
            options.increment_patch.then_some(BumpOp::IncrementPatch),
            options.patch.map(BumpOp::SetPatch),
            options.increment_minor.then_some(BumpOp::IncrementMinor),
            options.minor.map(BumpOp::SetMinor),
            options.increment_major.then_some(BumpOp::IncrementMajor),
            options.major.map(BumpOp::SetMajor),
        ]
        .into_iter()
        .flatten()
        .collect();

        match candidates.as_slice() {
            [op] => Ok(*op),
            [] => Err(ChangelogError::validation(
                "One update option must be specified",
            )),
            ops => Err(ChangelogError::validation(format!(
                "Only one update option should be specified, got {}: {}",
                ops.len(),
                ops.iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            ))),
        }
    }
}

impl fmt::Display for BumpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BumpOp::IncrementPatch => write!(f, "increment patch"),
            BumpOp::IncrementMinor => write!(f, "increment minor"),
            BumpOp::IncrementMajor => write!(f, "increment major"),
            BumpOp::SetPatch(n) => write!(f, "set patch to {}", n),
            BumpOp::SetMinor(n) => write!(f, "set minor to {}", n),
            BumpOp::SetMajor(n) => write!(f, "set major to {}", n),
        }
    }
}

fn increment(value: u64, dimension: &str) -> Result<u64> {
    value.checked_add(1).ok_or_else(|| {
        ChangelogError::validation(format!("Cannot increment {} past {}", dimension, value))
    })
}

fn require_greater(dimension: &str, old: u64, new: u64) -> Result<()> {
    if new > old {
        Ok(())
    } else {
        Err(ChangelogError::validation(format!(
            "Tried to set {} to {}, which isn't greater than {}",
            dimension, new, old
        )))
    }
}

impl Version {
    /// Apply a bump instruction, resetting lower components as semver requires.
    ///
    /// Absolute settings must be strictly greater than the current value on
    /// their own dimension.
    pub fn apply(&self, op: BumpOp) -> Result<Version> {
        let v = *self;
        let next = match op {
            BumpOp::IncrementPatch => Version::new(v.major, v.minor, increment(v.patch, "patch")?),
            BumpOp::IncrementMinor => Version::new(v.major, increment(v.minor, "minor")?, 0),
            BumpOp::IncrementMajor => Version::new(increment(v.major, "major")?, 0, 0),
            BumpOp::SetPatch(n) => {
                require_greater("patch", v.patch, n)?;
                Version::new(v.major, v.minor, n)
            }
            BumpOp::SetMinor(n) => {
                require_greater("minor", v.minor, n)?;
                Version::new(v.major, n, 0)
            }
            BumpOp::SetMajor(n) => {
                require_greater("major", v.major, n)?;
                Version::new(n, 0, 0)
            }
        };
        Ok(next)
    }
}

impl ChangeData {
    /// Promote the Unreleased content into a new dated release.
    ///
    /// Unreleased is replaced by a fresh, empty skeleton. Returns the new version.
    /// On error the model is left untouched.
    pub fn update(&mut self, op: BumpOp, clock: &dyn Clock) -> Result<Version> {
        let current = self.latest_version().unwrap_or(DEFAULT_VERSION);
        let new_version = current.apply(op)?;
        debug!(%current, %new_version, %op, "computed next version");

        let mut release = self
            .releases
            .remove(&ReleaseKey::Unreleased)
            .unwrap_or_default();
        release.date = Some(clock.today());

        self.releases.insert(ReleaseKey::Version(new_version), release);
        self.releases
            .insert(ReleaseKey::Unreleased, Release::bare_unreleased());

        info!(version = %new_version, "promoted Unreleased to a new release");
        Ok(new_version)
    }
}
