use crate::areas::repository::Repository;
use crate::areas::workspace::Workspace;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::objects::commit::Commit;
use crate::errors::RepositoryError;

impl Repository {
    /// Restore `path` as it is in the head commit
    pub fn checkout_file(&mut self, path: &str) -> anyhow::Result<()> {
        let (_, head_commit) = self.head_commit()?;

        self.restore_file(&head_commit, path)
    }

    /// Restore `path` as it is in the commit `commit_id` (full or abbreviated)
    pub fn checkout_file_from(&mut self, commit_id: &str, path: &str) -> anyhow::Result<()> {
        let commit_oid = self.database().resolve_prefix(commit_id)?;
        let commit = self.database().get_commit(&commit_oid)?;

        self.restore_file(&commit, path)
    }

    // The path also leaves the staging area, so the restored version is what
    // the next commit records.
    fn restore_file(&self, commit: &Commit, path: &str) -> anyhow::Result<()> {
        let path = Workspace::normalize_path(path);
        let blob_oid = commit
            .blob_for(&path)
            .ok_or(RepositoryError::FileNotFoundInCommit)?;
        let blob = self.database().get_blob(blob_oid)?;

        let mut staging = self.staging();
        staging.rehydrate()?;

        self.workspace().write_file(&path, blob.data())?;
        staging.unstage(&path);

        staging.write_updates()?;

        Ok(())
    }

    /// Switch to `branch_name`, replacing the working tree with its tip snapshot
    pub fn checkout_branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(branch_name.to_string())
            .map_err(|_| RepositoryError::NoSuchBranch)?;
        let target_oid = self
            .refs()
            .read_branch(&branch_name)?
            .ok_or(RepositoryError::NoSuchBranch)?;

        if self.refs().is_current_branch(&branch_name)? {
            return Err(RepositoryError::AlreadyCurrentBranch.into());
        }

        let (_, head_commit) = self.head_commit()?;
        let target_commit = self.database().get_commit(&target_oid)?;

        let mut staging = self.staging();
        staging.rehydrate()?;

        Migration::new(self, head_commit.tree(), target_commit.tree()).apply_changes()?;

        staging.clear();
        staging.write_updates()?;
        self.refs().set_head(&branch_name)?;

        tracing::info!(branch = %branch_name, %target_oid, "switched branch");

        Ok(())
    }
}
