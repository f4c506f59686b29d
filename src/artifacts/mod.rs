//! Gitlet data structures and algorithms
//!
//! - `branch`: Branch name validation
//! - `checkout`: Working tree migration between snapshots
//! - `core`: Shared utilities (pager wrapper)
//! - `log`: Commit history traversal
//! - `merge`: Split point search, path classification and conflict content
//! - `objects`: Object types (blob, commit) and ids
//! - `staging`: Staging record encoding helpers
//! - `status`: Working tree status inspection

pub mod branch;
pub mod checkout;
pub mod core;
pub mod log;
pub mod merge;
pub mod objects;
pub mod staging;
pub mod status;
