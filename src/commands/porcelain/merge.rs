use crate::areas::repository::Repository;
use crate::areas::staging::StagingArea;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::merge::MergeOutcome;
use crate::artifacts::merge::classifier::{MergeAction, classify};
use crate::artifacts::merge::conflict::conflict_content;
use crate::artifacts::merge::split_point::SplitPointFinder;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use bytes::Bytes;
use std::collections::BTreeSet;

const ALREADY_MERGED_NOTICE: &str = "Given branch is an ancestor of the current branch.";
const FAST_FORWARD_NOTICE: &str = "Current branch fast-forwarded.";
const CONFLICT_NOTICE: &str = "Encountered a merge conflict.";

impl Repository {
    /// Merge the branch `branch_name` into the current branch
    ///
    /// Unless one tip is an ancestor of the other, every path is classified
    /// against the split point and the result is committed with both tips as
    /// parents, conflicts included.
    pub fn merge(&mut self, branch_name: &str) -> anyhow::Result<MergeOutcome> {
        let mut staging = self.staging();
        staging.rehydrate()?;

        if !staging.is_clear() || staging.pending_merge().is_some() {
            return Err(RepositoryError::UncommittedChanges.into());
        }

        let current_branch = self.refs().current_branch()?;
        if current_branch.as_ref() == branch_name {
            return Err(RepositoryError::CannotMergeSelf.into());
        }

        let other_branch = BranchName::try_parse(branch_name.to_string())
            .map_err(|_| RepositoryError::BranchNotFound)?;
        let other_oid = self
            .refs()
            .read_branch(&other_branch)?
            .ok_or(RepositoryError::BranchNotFound)?;

        let (head_oid, head_commit) = self.head_commit()?;
        let other_commit = self.database().get_commit(&other_oid)?;

        let mut migration = Migration::new(self, head_commit.tree(), other_commit.tree());
        migration.plan_changes()?;

        let split_oid = self
            .find_split_point(&head_oid, &other_oid)?
            .ok_or_else(|| RepositoryError::CorruptObject("no common ancestor".to_string()))?;

        tracing::debug!(%head_oid, %other_oid, %split_oid, "found split point");

        if split_oid == other_oid {
            writeln!(self.writer(), "{}", ALREADY_MERGED_NOTICE)?;
            return Ok(MergeOutcome::AlreadyMerged);
        }

        // fast-forward is a whole-branch checkout of the other branch
        if split_oid == head_oid {
            self.workspace().apply_migration(&migration)?;
            staging.clear();
            staging.write_updates()?;
            self.refs().set_head(&other_branch)?;

            tracing::info!(from = %current_branch, to = %other_branch, %other_oid, "fast-forwarded");
            writeln!(self.writer(), "{}", FAST_FORWARD_NOTICE)?;
            return Ok(MergeOutcome::FastForward);
        }

        let split_commit = self.database().get_commit(&split_oid)?;
        let conflicts =
            self.apply_merge_actions(&mut staging, &split_commit, &head_commit, &other_commit)?;

        staging.set_pending_merge(other_oid);
        let message = format!("Merged {} into {}.", other_branch, current_branch);
        let commit_oid = self.write_commit(&mut staging, &message)?;
        staging.write_updates()?;

        if !conflicts.is_empty() {
            writeln!(self.writer(), "{}", CONFLICT_NOTICE)?;
        }

        Ok(MergeOutcome::Merged {
            commit: commit_oid,
            conflicts,
        })
    }

    fn find_split_point(
        &self,
        head_oid: &ObjectId,
        other_oid: &ObjectId,
    ) -> anyhow::Result<Option<ObjectId>> {
        let split_point_finder = SplitPointFinder::new(|oid: &ObjectId| {
            Ok(self.database().get_commit(oid)?.parents().to_vec())
        });

        split_point_finder.find_split_point(head_oid, other_oid)
    }

    /// Stage and write the outcome of every path, returning the conflicting ones
    fn apply_merge_actions(
        &self,
        staging: &mut StagingArea,
        split: &Commit,
        current: &Commit,
        other: &Commit,
    ) -> anyhow::Result<Vec<String>> {
        let paths = split
            .tree()
            .keys()
            .chain(current.tree().keys())
            .chain(other.tree().keys())
            .collect::<BTreeSet<_>>();

        let mut conflicts = Vec::new();

        for path in paths {
            let action = classify(
                split.blob_for(path),
                current.blob_for(path),
                other.blob_for(path),
            );

            tracing::trace!(%path, ?action, "classified path");

            match action {
                MergeAction::Keep => {}
                MergeAction::TakeOther(blob_oid) => {
                    let blob = self.database().get_blob(&blob_oid)?;
                    self.workspace().write_file(path, blob.data())?;
                    staging.stage_addition(path, blob_oid);
                }
                MergeAction::Remove => {
                    staging.stage_removal(path);
                    self.workspace().remove_file(path)?;
                }
                MergeAction::Conflict {
                    current: current_blob,
                    other: other_blob,
                } => {
                    let content = conflict_content(
                        &self.blob_content(current_blob.as_ref())?,
                        &self.blob_content(other_blob.as_ref())?,
                    );
                    let blob_oid = self.database().put_blob(content.clone())?;
                    self.workspace().write_file(path, &content)?;
                    staging.stage_addition(path, blob_oid);
                    conflicts.push(path.clone());
                }
            }
        }

        Ok(conflicts)
    }

    fn blob_content(&self, blob_oid: Option<&ObjectId>) -> anyhow::Result<Bytes> {
        match blob_oid {
            Some(blob_oid) => Ok(self.database().get_blob(blob_oid)?.into_data()),
            None => Ok(Bytes::new()),
        }
    }
}
