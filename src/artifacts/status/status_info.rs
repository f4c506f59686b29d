use crate::areas::repository::Repository;
use crate::areas::staging::StagingArea;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Tree;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::file_change::WorkspaceChangeType;
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};

pub type ChangeSet = BTreeMap<String, WorkspaceChangeType>;
pub type FileSet = BTreeSet<String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusInfo {
    pub(crate) current_branch: BranchName,
    pub(crate) branches: Vec<BranchName>,
    pub(crate) staged_files: FileSet,
    pub(crate) removed_files: FileSet,
    pub(crate) workspace_changeset: ChangeSet,
    pub(crate) untracked_files: FileSet,
}

#[derive(new)]
pub struct Status<'r> {
    repository: &'r Repository,
}

impl<'r> Status<'r> {
    pub fn initialize(&self, staging: &StagingArea) -> anyhow::Result<StatusInfo> {
        let refs = self.repository.refs();
        let (_, head_commit) = self.repository.head_commit()?;
        let head_tree = head_commit.tree();

        let working_files = self
            .repository
            .workspace()
            .list_files()?
            .into_iter()
            .collect::<FileSet>();

        let workspace_changeset = self.check_workspace(&working_files, head_tree, staging)?;

        let untracked_files = working_files
            .iter()
            .filter(|path| {
                staging.staged_blob(path).is_none()
                    && (!head_tree.contains_key(*path) || staging.is_staged_for_removal(path))
            })
            .cloned()
            .collect::<FileSet>();

        Ok(StatusInfo {
            current_branch: refs.current_branch()?,
            branches: refs.list_branches()?,
            staged_files: staging.added().keys().cloned().collect(),
            removed_files: staging.removed().clone(),
            workspace_changeset,
            untracked_files,
        })
    }

    /// Tracked or staged files whose working copy differs from the version
    /// that would be committed
    fn check_workspace(
        &self,
        working_files: &FileSet,
        head_tree: &Tree,
        staging: &StagingArea,
    ) -> anyhow::Result<ChangeSet> {
        let mut changeset = ChangeSet::new();

        let expected = head_tree
            .iter()
            .filter(|(path, _)| {
                !staging.is_staged_for_removal(path) && staging.staged_blob(path).is_none()
            })
            .chain(staging.added().iter());

        for (path, expected_oid) in expected {
            if !working_files.contains(path) {
                changeset.insert(path.clone(), WorkspaceChangeType::Deleted);
            } else if &self.working_blob_id(path)? != expected_oid {
                changeset.insert(path.clone(), WorkspaceChangeType::Modified);
            }
        }

        Ok(changeset)
    }

    fn working_blob_id(&self, path: &str) -> anyhow::Result<ObjectId> {
        let data = self.repository.workspace().read_file(path)?;
        Blob::new(data).object_id()
    }
}
