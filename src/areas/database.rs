//! Object store
//!
//! Content-addressed, write-once storage of blobs and commits. Every object
//! is keyed by the SHA-1 of its serialized bytes, so storing the same content
//! twice leaves exactly one stored object.

use crate::areas::storage::Storage;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::RepositoryError;
use bytes::Bytes;
use std::io::Cursor;
use std::rc::Rc;

pub struct Database {
    storage: Rc<dyn Storage>,
}

impl Database {
    pub fn new(storage: Rc<dyn Storage>) -> Self {
        Database { storage }
    }

    pub fn put_blob(&self, data: Bytes) -> anyhow::Result<ObjectId> {
        self.store(&Blob::new(data))
    }

    pub fn put_commit(&self, commit: &Commit) -> anyhow::Result<ObjectId> {
        self.store(commit)
    }

    /// Persist `object` unless an object with the same id is already stored
    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let object_id = object.object_id()?;
        let object_key = object_id.to_key(object.object_type());

        if !self.storage.exists(&object_key)? {
            self.storage.put(&object_key, object.serialize()?)?;
            tracing::debug!(%object_id, object_type = %object.object_type(), "stored object");
        }

        Ok(object_id)
    }

    pub fn get_blob(&self, object_id: &ObjectId) -> anyhow::Result<Blob> {
        let content = self.load(object_id, ObjectType::Blob)?;
        Blob::deserialize(Cursor::new(content))
    }

    pub fn get_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        let content = self.load(object_id, ObjectType::Commit)?;
        Commit::deserialize(Cursor::new(content))
    }

    pub fn contains_commit(&self, object_id: &ObjectId) -> anyhow::Result<bool> {
        self.storage
            .exists(&object_id.to_key(ObjectType::Commit))
    }

    fn load(&self, object_id: &ObjectId, object_type: ObjectType) -> anyhow::Result<Bytes> {
        let object_key = object_id.to_key(object_type);

        self.storage
            .get(&object_key)?
            .ok_or_else(|| RepositoryError::ObjectNotFound(object_key).into())
    }

    /// Ids of every stored commit, in storage enumeration order
    pub fn commit_ids(&self) -> anyhow::Result<Vec<ObjectId>> {
        let prefix = ObjectType::Commit.storage_dir();

        self.storage
            .list(prefix)?
            .into_iter()
            .filter_map(|key| {
                key.strip_prefix(prefix)
                    .map(|id| id.trim_start_matches('/').to_string())
            })
            .map(ObjectId::try_parse)
            .collect()
    }

    /// Resolve a full or abbreviated commit id
    ///
    /// Full ids are looked up directly. An abbreviation must match exactly one
    /// stored commit id by prefix.
    pub fn resolve_prefix(&self, partial_id: &str) -> anyhow::Result<ObjectId> {
        if !ObjectId::is_valid_prefix(partial_id) {
            return Err(RepositoryError::CommitNotFound.into());
        }

        let partial_id = partial_id.to_ascii_lowercase();

        if partial_id.len() == OBJECT_ID_LENGTH {
            let object_id = ObjectId::try_parse(partial_id)?;
            return if self.contains_commit(&object_id)? {
                Ok(object_id)
            } else {
                Err(RepositoryError::CommitNotFound.into())
            };
        }

        let mut candidates = self
            .commit_ids()?
            .into_iter()
            .filter(|object_id| object_id.as_ref().starts_with(&partial_id));

        match (candidates.next(), candidates.next()) {
            (Some(object_id), None) => Ok(object_id),
            (Some(_), Some(_)) => Err(RepositoryError::AmbiguousId(partial_id).into()),
            (None, _) => Err(RepositoryError::CommitNotFound.into()),
        }
    }
}
