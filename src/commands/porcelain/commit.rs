use crate::areas::repository::Repository;
use crate::areas::staging::StagingArea;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;

impl Repository {
    /// Record the staged snapshot as a new commit on the current branch
    pub fn commit(&mut self, message: &str) -> anyhow::Result<ObjectId> {
        let mut staging = self.staging();
        staging.rehydrate()?;

        let commit_oid = self.write_commit(&mut staging, message)?;

        staging.write_updates()?;

        Ok(commit_oid)
    }

    /// Build, store and check out a commit from `staging`, then clear it
    ///
    /// A pending merge becomes the second parent and allows a commit with
    /// nothing staged.
    pub(crate) fn write_commit(
        &self,
        staging: &mut StagingArea,
        message: &str,
    ) -> anyhow::Result<ObjectId> {
        if message.is_empty() {
            return Err(RepositoryError::EmptyMessage.into());
        }

        if staging.is_clear() && staging.pending_merge().is_none() {
            return Err(RepositoryError::NothingStaged.into());
        }

        let (head_oid, head_commit) = self.head_commit()?;

        let mut tree = head_commit.tree().clone();
        tree.extend(
            staging
                .added()
                .iter()
                .map(|(path, blob_id)| (path.clone(), blob_id.clone())),
        );
        tree.retain(|path, _| !staging.is_staged_for_removal(path));

        let parents = std::iter::once(head_oid)
            .chain(staging.pending_merge().cloned())
            .collect::<Vec<_>>();

        let commit = Commit::new(
            message.to_string(),
            Commit::timestamp_from_env(),
            parents,
            tree,
        );
        let commit_oid = self.database().put_commit(&commit)?;
        self.refs().update_head(&commit_oid)?;
        staging.clear();

        tracing::info!(%commit_oid, parents = commit.parents().len(), "created commit");

        Ok(commit_oid)
    }
}

#[cfg(test)]
mod tests {
    use crate::artifacts::objects::object_id::ObjectId;
    use crate::commands::porcelain::fixtures::{TestRepository, repo};
    use crate::errors::RepositoryError;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    fn empty_messages_are_rejected(mut repo: TestRepository) {
        repo.write("f.txt", "A\n");
        repo.repository.add("f.txt").unwrap();

        let error = repo.repository.commit("").unwrap_err();

        assert_eq!(
            RepositoryError::find(&error),
            Some(&RepositoryError::EmptyMessage)
        );
        assert!(!repo.repository.staging().is_clear());
    }

    #[rstest]
    fn nothing_staged_is_rejected(mut repo: TestRepository) {
        let error = repo.repository.commit("nothing").unwrap_err();

        assert_eq!(
            RepositoryError::find(&error),
            Some(&RepositoryError::NothingStaged)
        );
    }

    #[rstest]
    fn new_tree_is_parent_tree_minus_removed_plus_added(mut repo: TestRepository) {
        repo.write("keep.txt", "keep\n");
        repo.write("gone.txt", "gone\n");
        repo.repository.add("keep.txt").unwrap();
        repo.repository.add("gone.txt").unwrap();
        let first = repo.repository.commit("c1").unwrap();

        repo.repository.rm("gone.txt").unwrap();
        repo.write("new/file.txt", "new\n");
        repo.repository.add("new/file.txt").unwrap();
        let second = repo.repository.commit("c2").unwrap();

        let commit = repo.repository.database().get_commit(&second).unwrap();
        assert_eq!(commit.parents(), &[first]);
        assert_eq!(
            commit.tree().keys().cloned().collect::<Vec<_>>(),
            vec!["keep.txt".to_string(), "new/file.txt".to_string()]
        );
        assert_eq!(
            commit.blob_for("new/file.txt"),
            Some(&ObjectId::digest(b"new\n"))
        );
        assert!(repo.repository.staging().is_clear());
        assert_eq!(repo.repository.refs().head_oid().unwrap(), second);
    }
}
