pub mod changelog;
pub mod cli;
pub mod clock;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod ui;

pub use changelog::{Changelog, Parser, Renderer};
pub use domain::{BumpOp, ChangeData, Release, ReleaseKey, SectionKind, Version};
pub use error::{ChangelogError, Result};
