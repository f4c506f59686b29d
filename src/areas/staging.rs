//! Staging area
//!
//! Pending additions and removals relative to the current commit's tree,
//! plus the commit id of a merge in progress. The whole area is loaded at the
//! start of a command with [`StagingArea::rehydrate`] and persisted at the
//! end with [`StagingArea::write_updates`].
//!
//! See [`crate::artifacts::staging`] for the on-disk format.

use crate::areas::storage::Storage;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::staging::checksum::Checksum;
use crate::artifacts::staging::staging_header::StagingHeader;
use crate::artifacts::staging::{HEADER_SIZE, SIGNATURE, VERSION};
use crate::errors::RepositoryError;
use anyhow::Context;
use byteorder::{NetworkEndian, ReadBytesExt, WriteBytesExt};
use bytes::Bytes;
use std::collections::{BTreeMap, BTreeSet};
use std::io::Cursor;
use std::rc::Rc;

/// Storage key of the staging record
pub const STAGING_KEY: &str = "staging/state";

pub struct StagingArea {
    storage: Rc<dyn Storage>,
    /// Paths staged for addition, mapped to their blob ids
    added: BTreeMap<String, ObjectId>,
    /// Paths staged for removal
    removed: BTreeSet<String>,
    /// Second parent of the next commit, set by merge
    pending_merge: Option<ObjectId>,
    changed: bool,
}

impl std::fmt::Debug for StagingArea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StagingArea")
            .field("added", &self.added)
            .field("removed", &self.removed)
            .field("pending_merge", &self.pending_merge)
            .field("changed", &self.changed)
            .finish()
    }
}

impl StagingArea {
    pub fn new(storage: Rc<dyn Storage>) -> Self {
        StagingArea {
            storage,
            added: BTreeMap::new(),
            removed: BTreeSet::new(),
            pending_merge: None,
            changed: false,
        }
    }

    /// Load the staging record, leaving the area empty if none was written yet
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.reset();

        let content = match self.storage.get(STAGING_KEY)? {
            Some(content) if !content.is_empty() => content,
            _ => return Ok(()),
        };

        let mut reader = Checksum::new(Cursor::new(content));
        let header = Self::parse_header(&mut reader)?;

        for _ in 0..header.added_count {
            let path = Self::parse_path(&mut reader)?;
            let object_id = Self::parse_object_id(&mut reader)?;
            self.added.insert(path, object_id);
        }

        for _ in 0..header.removed_count {
            let path = Self::parse_path(&mut reader)?;
            self.removed.insert(path);
        }

        let has_pending_merge = reader.read(1)?;
        if has_pending_merge[0] == 1 {
            self.pending_merge = Some(Self::parse_object_id(&mut reader)?);
        }

        reader.verify()
    }

    fn parse_header(reader: &mut Checksum<Cursor<Bytes>>) -> anyhow::Result<StagingHeader> {
        let header_bytes = reader.read(HEADER_SIZE)?;
        let header = StagingHeader::deserialize(Cursor::new(header_bytes))?;

        if header.marker != SIGNATURE {
            return Err(RepositoryError::CorruptObject(
                "invalid staging area signature".to_string(),
            )
            .into());
        }

        if header.version != VERSION {
            return Err(RepositoryError::CorruptObject(format!(
                "unsupported staging area version: {}",
                header.version
            ))
            .into());
        }

        Ok(header)
    }

    fn parse_path(reader: &mut Checksum<Cursor<Bytes>>) -> anyhow::Result<String> {
        let length = Cursor::new(reader.read(2)?).read_u16::<NetworkEndian>()?;
        let path = reader.read(length as usize)?;

        String::from_utf8(path.to_vec()).map_err(|_| {
            RepositoryError::CorruptObject("staged path is not valid UTF-8".to_string()).into()
        })
    }

    fn parse_object_id(reader: &mut Checksum<Cursor<Bytes>>) -> anyhow::Result<ObjectId> {
        let object_id = reader.read(OBJECT_ID_LENGTH)?;
        let object_id = String::from_utf8(object_id.to_vec()).unwrap_or_default();

        ObjectId::try_parse(object_id)
            .map_err(|_| RepositoryError::CorruptObject("invalid staged object id".to_string()).into())
    }

    /// Persist the staging record if anything changed since it was loaded
    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        if !self.changed {
            return Ok(());
        }

        let mut writer = Checksum::new(Vec::new());

        let header = StagingHeader::new(
            String::from(SIGNATURE),
            VERSION,
            self.added.len() as u32,
            self.removed.len() as u32,
        );
        writer.write(&header.serialize()?)?;

        for (path, object_id) in &self.added {
            writer.write(&Self::serialize_path(path)?)?;
            writer.write(object_id.as_ref().as_bytes())?;
        }

        for path in &self.removed {
            writer.write(&Self::serialize_path(path)?)?;
        }

        match &self.pending_merge {
            Some(object_id) => {
                writer.write(&[1])?;
                writer.write(object_id.as_ref().as_bytes())?;
            }
            None => writer.write(&[0])?,
        }

        self.storage.put(STAGING_KEY, writer.write_checksum()?)?;
        self.changed = false;

        Ok(())
    }

    fn serialize_path(path: &str) -> anyhow::Result<Vec<u8>> {
        let length = u16::try_from(path.len())
            .with_context(|| format!("path is too long to stage: {}", path))?;

        let mut bytes = Vec::with_capacity(2 + path.len());
        bytes.write_u16::<NetworkEndian>(length)?;
        bytes.extend_from_slice(path.as_bytes());

        Ok(bytes)
    }

    fn reset(&mut self) {
        self.added.clear();
        self.removed.clear();
        self.pending_merge = None;
        self.changed = false;
    }

    /// Stage `path` for addition, cancelling any pending removal
    pub fn stage_addition(&mut self, path: &str, object_id: ObjectId) {
        self.removed.remove(path);
        self.added.insert(path.to_string(), object_id);
        self.changed = true;
    }

    /// Stage `path` for removal, cancelling any pending addition
    pub fn stage_removal(&mut self, path: &str) {
        self.added.remove(path);
        self.removed.insert(path.to_string());
        self.changed = true;
    }

    /// Drop `path` from both the additions and the removals
    pub fn unstage(&mut self, path: &str) {
        let was_added = self.added.remove(path).is_some();
        let was_removed = self.removed.remove(path);
        self.changed |= was_added || was_removed;
    }

    /// Drop the staged addition of `path`, reporting whether there was one
    pub fn unstage_addition(&mut self, path: &str) -> bool {
        let was_added = self.added.remove(path).is_some();
        self.changed |= was_added;
        was_added
    }

    pub fn clear(&mut self) {
        self.reset();
        self.changed = true;
    }

    /// Whether there are no staged additions or removals
    pub fn is_clear(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    pub fn added(&self) -> &BTreeMap<String, ObjectId> {
        &self.added
    }

    pub fn removed(&self) -> &BTreeSet<String> {
        &self.removed
    }

    pub fn staged_blob(&self, path: &str) -> Option<&ObjectId> {
        self.added.get(path)
    }

    pub fn is_staged_for_removal(&self, path: &str) -> bool {
        self.removed.contains(path)
    }

    pub fn pending_merge(&self) -> Option<&ObjectId> {
        self.pending_merge.as_ref()
    }

    pub fn set_pending_merge(&mut self, object_id: ObjectId) {
        self.pending_merge = Some(object_id);
        self.changed = true;
    }
}
