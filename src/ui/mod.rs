//! User interface module - terminal output.
//!
//! - `formatter` - Pure formatting functions and their printing wrappers

pub mod formatter;

pub use formatter::{
    display_error, display_release, display_status, display_success, display_version,
    format_error, format_status, format_success,
};
