use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::RepositoryError;

impl Repository {
    /// Create a branch pointing at the current commit; HEAD does not move
    pub fn branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(branch_name.to_string())?;
        let head_oid = self.refs().head_oid()?;

        self.refs().create_branch(&branch_name, &head_oid)?;

        tracing::debug!(branch = %branch_name, %head_oid, "created branch");

        Ok(())
    }

    /// Delete a branch pointer; its commits stay in the object store
    pub fn rm_branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(branch_name.to_string())
            .map_err(|_| RepositoryError::BranchNotFound)?;

        if !self.refs().branch_exists(&branch_name)? {
            return Err(RepositoryError::BranchNotFound.into());
        }

        if self.refs().is_current_branch(&branch_name)? {
            return Err(RepositoryError::CannotRemoveCurrentBranch.into());
        }

        let deleted_oid = self.refs().delete_branch(&branch_name)?;

        tracing::debug!(branch = %branch_name, %deleted_oid, "deleted branch");

        Ok(())
    }
}
