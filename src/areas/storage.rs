//! Key-value persistence behind every repository area
//!
//! Keys are relative, `/`-separated paths such as `refs/HEAD` or
//! `objects/blobs/<id>`. [`FileStorage`] maps them onto files under the
//! `.gitlet` directory; [`InMemoryStorage`] keeps them in a map for tests.

use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use file_guard::Lock;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io::Write;
use std::ops::DerefMut;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub trait Storage {
    /// Value stored under `key`, or `None` when the key is absent
    fn get(&self, key: &str) -> anyhow::Result<Option<Bytes>>;

    /// Store `value` under `key`, replacing any previous value
    fn put(&self, key: &str, value: Bytes) -> anyhow::Result<()>;

    fn exists(&self, key: &str) -> anyhow::Result<bool>;

    /// All keys nested under `prefix`, sorted
    fn list(&self, prefix: &str) -> anyhow::Result<Vec<String>>;

    /// Remove `key`; removing an absent key is not an error
    fn delete(&self, key: &str) -> anyhow::Result<()>;
}

#[derive(Debug)]
pub struct FileStorage {
    root: Box<Path>,
}

impl FileStorage {
    pub fn new(root: Box<Path>) -> Self {
        FileStorage { root }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        key.split('/')
            .fold(self.root.to_path_buf(), |path, component| path.join(component))
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }

    fn prune_empty_parent_dirs(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && parent != self.root.as_ref()
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent)
                .with_context(|| format!("failed to remove empty directory at {:?}", parent))?;
            self.prune_empty_parent_dirs(parent)?;
        }

        Ok(())
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> anyhow::Result<Option<Bytes>> {
        let path = self.key_path(key);

        if !path.is_file() {
            return Ok(None);
        }

        let content =
            std::fs::read(&path).with_context(|| format!("unable to read {}", path.display()))?;

        Ok(Some(Bytes::from(content)))
    }

    fn put(&self, key: &str, value: Bytes) -> anyhow::Result<()> {
        let path = self.key_path(key);
        let parent = path
            .parent()
            .with_context(|| format!("invalid storage key {}", key))?;

        std::fs::create_dir_all(parent)
            .with_context(|| format!("unable to create directory {}", parent.display()))?;

        // write to a sibling temp file, then rename it over the key
        let temp_path = parent.join(Self::generate_temp_name());
        let mut file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .with_context(|| format!("unable to open {}", temp_path.display()))?;

        {
            let mut lock = file_guard::lock(&mut file, Lock::Exclusive, 0, 1)?;
            lock.deref_mut()
                .write_all(&value)
                .with_context(|| format!("unable to write {}", temp_path.display()))?;
        }

        std::fs::rename(&temp_path, &path)
            .with_context(|| format!("unable to rename temp file to {}", path.display()))?;

        Ok(())
    }

    fn exists(&self, key: &str) -> anyhow::Result<bool> {
        Ok(self.key_path(key).is_file())
    }

    fn list(&self, prefix: &str) -> anyhow::Result<Vec<String>> {
        let base = self.key_path(prefix);

        if !base.is_dir() {
            return Ok(Vec::new());
        }

        let mut keys = WalkDir::new(&base)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let relative = entry.path().strip_prefix(self.root.as_ref()).ok()?;
                let key = relative
                    .components()
                    .map(|component| component.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");
                Some(key)
            })
            .collect::<Vec<_>>();
        keys.sort();

        Ok(keys)
    }

    fn delete(&self, key: &str) -> anyhow::Result<()> {
        let path = self.key_path(key);

        if !path.is_file() {
            return Ok(());
        }

        std::fs::remove_file(&path)
            .with_context(|| format!("failed to delete {}", path.display()))?;
        self.prune_empty_parent_dirs(&path)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryStorage {
    entries: RefCell<BTreeMap<String, Bytes>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for InMemoryStorage {
    fn get(&self, key: &str) -> anyhow::Result<Option<Bytes>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn put(&self, key: &str, value: Bytes) -> anyhow::Result<()> {
        self.entries.borrow_mut().insert(key.to_string(), value);
        Ok(())
    }

    fn exists(&self, key: &str) -> anyhow::Result<bool> {
        Ok(self.entries.borrow().contains_key(key))
    }

    fn list(&self, prefix: &str) -> anyhow::Result<Vec<String>> {
        let prefix = format!("{}/", prefix.trim_end_matches('/'));

        Ok(self
            .entries
            .borrow()
            .keys()
            .filter(|key| key.starts_with(&prefix))
            .cloned()
            .collect())
    }

    fn delete(&self, key: &str) -> anyhow::Result<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}
