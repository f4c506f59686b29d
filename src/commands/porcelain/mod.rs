//! User-facing commands
//!
//! - `init`: Create a repository with the shared root commit
//! - `add`, `rm`: Stage additions and removals
//! - `commit`: Record the staged snapshot
//! - `log`, `global-log`, `find`: Inspect commits
//! - `status`: Show branches, staged changes and working tree changes
//! - `branch`, `rm-branch`: Create and delete branch pointers
//! - `checkout`, `reset`: Restore files, switch branches, move the branch
//! - `merge`: Three-way merge of another branch into the current one

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod find;
pub mod init;
pub mod log;
pub mod merge;
pub mod reset;
pub mod rm;
pub mod status;
