//! Domain logic - the changelog model and version arithmetic, independent of files and git

pub mod bump;
pub mod release;
pub mod section;
pub mod version;

pub use bump::{BumpOp, BumpOptions};
pub use release::{trim_trailing_blank, ChangeData, Release, ReleaseKey, UNRELEASED};
pub use section::SectionKind;
pub use version::{Version, DEFAULT_VERSION};
