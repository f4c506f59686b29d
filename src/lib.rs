//! A minimal version-control engine
//!
//! Content-addressed blobs and commits, a staging area, branches, working-tree
//! checkout and a three-way merge, driven one command at a time through
//! [`Repository`](areas::repository::Repository).

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;
