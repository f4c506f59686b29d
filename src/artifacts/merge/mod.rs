//! Three-way merge
//!
//! - `split_point`: nearest common ancestor of two commits
//! - `classifier`: per-path decision from the split point, current and other trees
//! - `conflict`: content written for conflicting paths

pub mod classifier;
pub mod conflict;
pub mod split_point;

use crate::artifacts::objects::object_id::ObjectId;

/// Result of merging a branch into the current one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The other branch is already an ancestor of the current branch
    AlreadyMerged,
    /// The current branch was behind; the other branch is now checked out
    FastForward,
    /// A merge commit was created
    Merged {
        commit: ObjectId,
        conflicts: Vec<String>,
    },
}

impl MergeOutcome {
    pub fn has_conflicts(&self) -> bool {
        matches!(self, MergeOutcome::Merged { conflicts, .. } if !conflicts.is_empty())
    }
}
