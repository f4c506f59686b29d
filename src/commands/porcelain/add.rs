use crate::areas::repository::Repository;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::errors::RepositoryError;

impl Repository {
    /// Stage the working copy of `path` for the next commit
    ///
    /// A file whose content matches the current commit is unstaged instead.
    pub fn add(&mut self, path: &str) -> anyhow::Result<()> {
        let path = Workspace::normalize_path(path);

        let mut staging = self.staging();
        staging.rehydrate()?;

        if !self.workspace().file_exists(&path) {
            return Err(RepositoryError::FileNotFound.into());
        }

        let blob = Blob::new(self.workspace().read_file(&path)?);
        let blob_id = blob.object_id()?;
        let (_, head_commit) = self.head_commit()?;

        if head_commit.blob_for(&path) == Some(&blob_id) {
            tracing::debug!(%path, "content matches the current commit, unstaging");
            staging.unstage(&path);
        } else {
            self.database().store(&blob)?;
            tracing::debug!(%path, %blob_id, "staged for addition");
            staging.stage_addition(&path, blob_id);
        }

        staging.write_updates()
    }
}
