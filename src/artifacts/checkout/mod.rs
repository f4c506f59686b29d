//! Working-tree synchronization
//!
//! Moving the working tree from one commit's snapshot to another, used by
//! branch checkout, reset and fast-forward merges. Every collision with an
//! untracked file is detected before the first file is touched.

pub mod migration;
