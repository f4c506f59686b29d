//! Working tree status inspection
//!
//! Compares the working tree against the staging area and the current
//! commit's tree.
//!
//! - `file_change`: kinds of unstaged changes
//! - `status_info`: status computation

pub mod file_change;
pub mod status_info;
