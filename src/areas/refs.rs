//! Branches and HEAD
//!
//! ## Layout
//!
//! - `refs/HEAD`: name of the checked-out branch
//! - `refs/branches/<name>`: 40-character id of the branch tip commit
//!
//! HEAD always names a branch; there is no detached state.

use crate::areas::storage::Storage;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use bytes::Bytes;
use std::rc::Rc;

/// Storage key of the HEAD reference
pub const HEAD_KEY: &str = "refs/HEAD";

/// Storage namespace of branch references
pub const BRANCHES_PREFIX: &str = "refs/branches";

pub struct Refs {
    storage: Rc<dyn Storage>,
}

impl Refs {
    pub fn new(storage: Rc<dyn Storage>) -> Self {
        Refs { storage }
    }

    fn branch_key(name: &BranchName) -> String {
        format!("{}/{}", BRANCHES_PREFIX, name)
    }

    fn read_text(&self, key: &str) -> anyhow::Result<Option<String>> {
        match self.storage.get(key)? {
            Some(content) => {
                let content = String::from_utf8(content.to_vec()).map_err(|_| {
                    RepositoryError::CorruptObject(format!("{} is not valid UTF-8", key))
                })?;
                Ok(Some(content.trim().to_string()))
            }
            None => Ok(None),
        }
    }

    /// Name of the checked-out branch
    pub fn current_branch(&self) -> anyhow::Result<BranchName> {
        let name = self
            .read_text(HEAD_KEY)?
            .ok_or_else(|| RepositoryError::CorruptObject("HEAD is missing".to_string()))?;

        BranchName::try_parse(name)
    }

    pub fn is_current_branch(&self, name: &BranchName) -> anyhow::Result<bool> {
        Ok(&self.current_branch()? == name)
    }

    pub fn set_head(&self, name: &BranchName) -> anyhow::Result<()> {
        self.storage
            .put(HEAD_KEY, Bytes::from(name.as_ref().to_string()))?;
        tracing::debug!(branch = %name, "moved HEAD");

        Ok(())
    }

    /// Tip commit of the checked-out branch
    pub fn head_oid(&self) -> anyhow::Result<ObjectId> {
        let current_branch = self.current_branch()?;

        self.read_branch(&current_branch)?.ok_or_else(|| {
            RepositoryError::CorruptObject(format!("branch {} has no commit", current_branch))
                .into()
        })
    }

    /// Point the checked-out branch at `oid`
    pub fn update_head(&self, oid: &ObjectId) -> anyhow::Result<()> {
        self.update_branch(&self.current_branch()?, oid)
    }

    pub fn read_branch(&self, name: &BranchName) -> anyhow::Result<Option<ObjectId>> {
        self.read_text(&Self::branch_key(name))?
            .map(ObjectId::try_parse)
            .transpose()
    }

    pub fn branch_exists(&self, name: &BranchName) -> anyhow::Result<bool> {
        self.storage.exists(&Self::branch_key(name))
    }

    pub fn update_branch(&self, name: &BranchName, oid: &ObjectId) -> anyhow::Result<()> {
        self.storage
            .put(&Self::branch_key(name), Bytes::from(oid.to_string()))?;
        tracing::debug!(branch = %name, %oid, "updated branch");

        Ok(())
    }

    pub fn create_branch(&self, name: &BranchName, source_oid: &ObjectId) -> anyhow::Result<()> {
        if self.branch_exists(name)? {
            return Err(RepositoryError::BranchAlreadyExists.into());
        }

        self.update_branch(name, source_oid)
    }

    /// Remove the branch pointer, returning the commit it pointed at
    pub fn delete_branch(&self, name: &BranchName) -> anyhow::Result<ObjectId> {
        let oid = self
            .read_branch(name)?
            .ok_or(RepositoryError::BranchNotFound)?;

        self.storage.delete(&Self::branch_key(name))?;
        tracing::debug!(branch = %name, %oid, "deleted branch");

        Ok(oid)
    }

    /// All branch names, sorted
    pub fn list_branches(&self) -> anyhow::Result<Vec<BranchName>> {
        let prefix = format!("{}/", BRANCHES_PREFIX);

        let mut branches = self
            .storage
            .list(BRANCHES_PREFIX)?
            .into_iter()
            .filter_map(|key| key.strip_prefix(&prefix).map(str::to_string))
            .map(BranchName::try_parse)
            .collect::<anyhow::Result<Vec<_>>>()?;
        branches.sort();

        Ok(branches)
    }
}
