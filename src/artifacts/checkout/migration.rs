use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Tree;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use bytes::Bytes;
use std::collections::BTreeMap;

/// Type of file system action required to reach the target snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ActionType {
    /// Create a file the current snapshot does not track
    Add,
    /// Delete a file the target snapshot does not track
    Delete,
    /// Overwrite a file tracked by both snapshots
    Modify,
}

/// Planned actions grouped by type, each sorted by path
pub type ActionsSet = BTreeMap<ActionType, Vec<(String, Option<ObjectId>)>>;

/// Plan and execute the move from the current snapshot to a target snapshot
pub struct Migration<'r> {
    repository: &'r Repository,
    current: &'r Tree,
    target: &'r Tree,
    actions: ActionsSet,
}

impl<'r> Migration<'r> {
    pub fn new(repository: &'r Repository, current: &'r Tree, target: &'r Tree) -> Self {
        let actions = BTreeMap::from([
            (ActionType::Add, Vec::new()),
            (ActionType::Delete, Vec::new()),
            (ActionType::Modify, Vec::new()),
        ]);

        Self {
            repository,
            current,
            target,
            actions,
        }
    }

    pub fn actions_of(
        &self,
        action: ActionType,
    ) -> impl Iterator<Item = &(String, Option<ObjectId>)> {
        self.actions.get(&action).into_iter().flatten()
    }

    pub fn apply_changes(&mut self) -> anyhow::Result<()> {
        self.plan_changes()?;
        self.repository.workspace().apply_migration(self)?;

        Ok(())
    }

    /// Fail with `UntrackedFileConflict` if the target would overwrite an
    /// untracked working file, otherwise record the actions to perform
    pub fn plan_changes(&mut self) -> anyhow::Result<()> {
        let untracked_overwritten = self.untracked_overwritten()?;

        if !untracked_overwritten.is_empty() {
            tracing::debug!(paths = ?untracked_overwritten, "untracked files in the way");
            return Err(RepositoryError::UntrackedFileConflict.into());
        }

        let (current, target) = (self.current, self.target);

        for path in current.keys() {
            if !target.contains_key(path) {
                self.record_change(ActionType::Delete, path, None);
            }
        }

        for (path, object_id) in target {
            let action = if current.contains_key(path) {
                ActionType::Modify
            } else {
                ActionType::Add
            };
            self.record_change(action, path, Some(object_id.clone()));
        }

        Ok(())
    }

    fn untracked_overwritten(&self) -> anyhow::Result<Vec<String>> {
        Ok(self
            .repository
            .workspace()
            .list_files()?
            .into_iter()
            .filter(|path| !self.current.contains_key(path) && self.is_clobbered(path))
            .collect())
    }

    /// Whether writing the target snapshot would replace the working file
    /// `path`, directly or through a file/directory swap along its path
    fn is_clobbered(&self, path: &str) -> bool {
        if self.target.contains_key(path) {
            return true;
        }

        let dir_prefix = format!("{}/", path);
        let target_below = self
            .target
            .range(dir_prefix.clone()..)
            .next()
            .is_some_and(|(target_path, _)| target_path.starts_with(&dir_prefix));

        let target_above = path
            .match_indices('/')
            .any(|(index, _)| self.target.contains_key(&path[..index]));

        target_below || target_above
    }

    fn record_change(&mut self, action: ActionType, path: &str, object_id: Option<ObjectId>) {
        self.actions
            .entry(action)
            .or_default()
            .push((path.to_string(), object_id));
    }

    pub fn load_blob_data(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        Ok(self.repository.database().get_blob(object_id)?.into_data())
    }
}
