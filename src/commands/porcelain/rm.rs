use crate::areas::repository::Repository;
use crate::areas::workspace::Workspace;
use crate::errors::RepositoryError;

impl Repository {
    /// Unstage `path`, and stop tracking it if the current commit does
    ///
    /// A tracked file is also deleted from the working tree.
    pub fn rm(&mut self, path: &str) -> anyhow::Result<()> {
        let path = Workspace::normalize_path(path);

        let mut staging = self.staging();
        staging.rehydrate()?;

        let (_, head_commit) = self.head_commit()?;
        let is_tracked = head_commit.tracks(&path);
        let was_staged = staging.unstage_addition(&path);

        if !is_tracked && !was_staged {
            return Err(RepositoryError::NothingToRemove.into());
        }

        if is_tracked {
            staging.stage_removal(&path);
            self.workspace().remove_file(&path)?;
            tracing::debug!(%path, "staged for removal");
        }

        staging.write_updates()
    }
}
