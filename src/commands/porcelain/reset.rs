use crate::areas::repository::Repository;
use crate::artifacts::checkout::migration::Migration;

impl Repository {
    /// Move the current branch to `commit_id` and check out its snapshot
    pub fn reset(&mut self, commit_id: &str) -> anyhow::Result<()> {
        let target_oid = self.database().resolve_prefix(commit_id)?;
        let target_commit = self.database().get_commit(&target_oid)?;
        let (_, head_commit) = self.head_commit()?;

        let mut staging = self.staging();
        staging.rehydrate()?;

        Migration::new(self, head_commit.tree(), target_commit.tree()).apply_changes()?;

        staging.clear();
        staging.write_updates()?;
        self.refs().update_head(&target_oid)?;

        tracing::info!(%target_oid, "reset current branch");

        Ok(())
    }
}
