//! Stateful repository components
//!
//! - `storage`: Key-value persistence shared by the areas below
//! - `database`: Content-addressed store of blobs and commits
//! - `staging`: Pending additions and removals for the next commit
//! - `refs`: Branches and HEAD
//! - `workspace`: Working tree file system operations
//! - `repository`: The context that ties them together

pub mod database;
pub mod refs;
pub mod repository;
pub mod staging;
pub mod storage;
pub mod workspace;
