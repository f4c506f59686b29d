use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::Commit;
use crate::errors::RepositoryError;
use anyhow::Context;

impl Repository {
    pub fn init(&mut self) -> anyhow::Result<()> {
        if self.is_initialized()? {
            return Err(RepositoryError::AlreadyInitialized.into());
        }

        let root_oid = self
            .database()
            .put_commit(&Commit::root())
            .context("Failed to store the root commit")?;

        let default_branch = BranchName::default_branch();
        self.refs()
            .create_branch(&default_branch, &root_oid)
            .context("Failed to create the default branch")?;
        self.refs()
            .set_head(&default_branch)
            .context("Failed to create initial HEAD reference")?;

        let mut staging = self.staging();
        staging.clear();
        staging.write_updates()?;

        tracing::info!(path = %self.path().display(), %root_oid, "initialized repository");

        Ok(())
    }
}
