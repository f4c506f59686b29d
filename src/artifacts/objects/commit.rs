//! Commit object
//!
//! A commit records a full snapshot of the tracked files (its tree), a message,
//! a timestamp and zero to two parent commit ids.
//!
//! ## Format
//!
//! Commits are stored in a line-oriented, versioned text encoding. The commit id
//! is the SHA-1 of exactly these bytes and is never part of them:
//!
//! ```text
//! gitlet-commit 1
//! timestamp <text>
//! parent <commit-id>          (zero to two lines, in order)
//! entry <blob-id> <path>      (one line per tracked file, sorted by path)
//!
//! <commit message>
//! ```

use crate::errors::RepositoryError;
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use derive_new::new;
use std::collections::BTreeMap;
use std::io::BufRead;

/// Path to blob id mapping of one snapshot
pub type Tree = BTreeMap<String, ObjectId>;

/// Message of the root commit shared by every repository
pub const ROOT_COMMIT_MESSAGE: &str = "initial commit";

/// Display format of commit timestamps, e.g. `Thu Jan 1 00:00:00 1970 +0000`
pub const TIMESTAMP_FORMAT: &str = "%a %b %-d %H:%M:%S %Y %z";

/// Environment variable overriding the timestamp of new commits
pub const COMMIT_DATE_ENV: &str = "GITLET_COMMIT_DATE";

const FORMAT_HEADER: &str = "gitlet-commit 1";

#[derive(Debug, Clone, Eq, PartialEq, new)]
pub struct Commit {
    message: String,
    timestamp: String,
    parents: Vec<ObjectId>,
    tree: Tree,
}

impl Commit {
    /// The commit every repository starts from
    ///
    /// Fixed message, epoch timestamp and empty tree, so all repositories share
    /// the same root id.
    pub fn root() -> Self {
        Commit::new(
            ROOT_COMMIT_MESSAGE.to_string(),
            Self::epoch_timestamp(),
            Vec::new(),
            Tree::new(),
        )
    }

    pub fn epoch_timestamp() -> String {
        chrono::DateTime::from_timestamp(0, 0)
            .unwrap_or_default()
            .fixed_offset()
            .format(TIMESTAMP_FORMAT)
            .to_string()
    }

    /// Timestamp for a new commit
    ///
    /// Reads GITLET_COMMIT_DATE (RFC 2822 or `%Y-%m-%d %H:%M:%S %z`) and falls
    /// back to the current local time when it is unset or unparsable.
    pub fn timestamp_from_env() -> String {
        let timestamp = std::env::var(COMMIT_DATE_ENV).ok().and_then(|date_str| {
            chrono::DateTime::parse_from_rfc2822(&date_str)
                .or_else(|_| chrono::DateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S %z"))
                .ok()
        });

        timestamp
            .unwrap_or_else(|| chrono::Local::now().fixed_offset())
            .format(TIMESTAMP_FORMAT)
            .to_string()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    /// First parent, the one history follows
    pub fn parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    /// Second parent of a merge commit
    pub fn merge_parent(&self) -> Option<&ObjectId> {
        self.parents.get(1)
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn blob_for(&self, path: &str) -> Option<&ObjectId> {
        self.tree.get(path)
    }

    pub fn tracks(&self, path: &str) -> bool {
        self.tree.contains_key(path)
    }
}

fn corrupt(reason: impl Into<String>) -> anyhow::Error {
    RepositoryError::CorruptObject(reason.into()).into()
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        if self.timestamp.contains('\n') {
            return Err(corrupt("commit timestamp contains a newline"));
        }

        let mut lines = vec![FORMAT_HEADER.to_string()];
        lines.push(format!("timestamp {}", self.timestamp));
        for parent in &self.parents {
            lines.push(format!("parent {}", parent));
        }
        for (path, oid) in &self.tree {
            if path.contains('\n') {
                return Err(corrupt(format!("tracked path contains a newline: {:?}", path)));
            }
            lines.push(format!("entry {} {}", oid, path));
        }
        lines.push(String::new());
        lines.push(self.message.clone());

        Ok(Bytes::from(lines.join("\n")))
    }
}

impl Unpackable for Commit {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;

        let (header, message) = content
            .split_once("\n\n")
            .ok_or_else(|| corrupt("missing commit message separator"))?;
        let mut lines = header.lines();

        if lines.next() != Some(FORMAT_HEADER) {
            return Err(corrupt("unsupported commit format"));
        }

        let timestamp = lines
            .next()
            .and_then(|line| line.strip_prefix("timestamp "))
            .ok_or_else(|| corrupt("missing timestamp line"))?
            .to_string();

        let mut parents = Vec::new();
        let mut tree = Tree::new();
        for line in lines {
            if let Some(parent) = line.strip_prefix("parent ") {
                parents.push(ObjectId::try_parse(parent.to_string())?);
            } else if let Some(entry) = line.strip_prefix("entry ") {
                let (oid, path) = entry
                    .split_once(' ')
                    .ok_or_else(|| corrupt(format!("invalid tree entry: {}", entry)))?;
                tree.insert(path.to_string(), ObjectId::try_parse(oid.to_string())?);
            } else {
                return Err(corrupt(format!("unexpected commit line: {}", line)));
            }
        }

        Ok(Commit::new(message.to_string(), timestamp, parents, tree))
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }
}
