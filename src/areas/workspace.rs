use crate::artifacts::checkout::migration::{ActionType, Migration};
use anyhow::Context;
use bytes::Bytes;
use std::io::Write;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Name of the repository directory, never part of the working tree
pub const REPOSITORY_DIR: &str = ".gitlet";

const IGNORED_PATHS: [&str; 3] = [REPOSITORY_DIR, ".", ".."];

/// The working tree
///
/// Paths handed to and returned by the workspace are relative to its root and
/// use `/` as separator.
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    /// Working-tree-relative form of a user supplied path: `./a//b` is `a/b`
    pub fn normalize_path(file_path: &str) -> String {
        file_path
            .split('/')
            .filter(|component| !component.is_empty() && *component != ".")
            .collect::<Vec<_>>()
            .join("/")
    }

    fn full_path(&self, file_path: &str) -> PathBuf {
        file_path
            .split('/')
            .fold(self.path.to_path_buf(), |path, component| path.join(component))
    }

    fn is_ignored(path: &Path) -> bool {
        path.components().any(|component| {
            if let std::path::Component::Normal(name) = component {
                let name_str = name.to_string_lossy();
                IGNORED_PATHS.contains(&name_str.as_ref())
            } else {
                false
            }
        })
    }

    /// Every regular file in the working tree, sorted
    pub fn list_files(&self) -> anyhow::Result<Vec<String>> {
        let mut files = WalkDir::new(&self.path)
            .into_iter()
            .filter_entry(|entry| {
                entry
                    .path()
                    .strip_prefix(self.path.as_ref())
                    .map(|relative| !Self::is_ignored(relative))
                    .unwrap_or(false)
            })
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let relative = entry.path().strip_prefix(self.path.as_ref()).ok()?;
                Some(
                    relative
                        .components()
                        .map(|component| component.as_os_str().to_string_lossy())
                        .collect::<Vec<_>>()
                        .join("/"),
                )
            })
            .collect::<Vec<_>>();
        files.sort();

        Ok(files)
    }

    pub fn file_exists(&self, file_path: &str) -> bool {
        !Self::is_ignored(Path::new(file_path)) && self.full_path(file_path).is_file()
    }

    pub fn read_file(&self, file_path: &str) -> anyhow::Result<Bytes> {
        let full_path = self.full_path(file_path);

        let content = std::fs::read(&full_path)
            .with_context(|| format!("Failed to read file: {:?}", file_path))?;

        Ok(Bytes::from(content))
    }

    /// Create or overwrite a file, creating its parent directories as needed
    pub fn write_file(&self, file_path: &str, data: &[u8]) -> anyhow::Result<()> {
        let full_path = self.full_path(file_path);

        if let Some(parent) = full_path.parent() {
            self.make_directory(parent)?;
        }

        if full_path.is_dir() {
            std::fs::remove_dir_all(&full_path).with_context(|| {
                format!("Failed to remove existing directory: {:?}", file_path)
            })?;
        }

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&full_path)
            .with_context(|| format!("Failed to open file: {:?}", file_path))?;

        file.write_all(data)
            .with_context(|| format!("Failed to write to file: {:?}", file_path))?;

        Ok(())
    }

    /// Delete a file if present, then prune the directories it leaves empty
    pub fn remove_file(&self, file_path: &str) -> anyhow::Result<()> {
        let full_path = self.full_path(file_path);

        if !full_path.is_file() {
            return Ok(());
        }

        std::fs::remove_file(&full_path)
            .with_context(|| format!("Failed to remove file: {:?}", file_path))?;
        self.prune_empty_parent_dirs(&full_path)
    }

    fn prune_empty_parent_dirs(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && parent != self.path.as_ref()
            && parent.starts_with(self.path.as_ref())
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent)
                .with_context(|| format!("Failed to remove empty directory: {:?}", parent))?;
            self.prune_empty_parent_dirs(parent)?;
        }

        Ok(())
    }

    fn make_directory(&self, dir_path: &Path) -> anyhow::Result<()> {
        // a file standing where a directory is needed gets replaced
        for ancestor in dir_path
            .ancestors()
            .filter(|ancestor| ancestor.starts_with(self.path.as_ref()))
        {
            if ancestor.is_file() {
                std::fs::remove_file(ancestor)
                    .with_context(|| format!("Failed to remove file: {:?}", ancestor))?;
            }
        }

        std::fs::create_dir_all(dir_path)
            .with_context(|| format!("Failed to create directory: {:?}", dir_path))?;

        Ok(())
    }

    // Deletions run first so that a directory emptied by them can be pruned
    // before a file of the same name is written.
    pub fn apply_migration(&self, migration: &Migration) -> anyhow::Result<()> {
        for (file_path, _) in migration.actions_of(ActionType::Delete) {
            self.remove_file(file_path)?;
        }

        for action in [ActionType::Modify, ActionType::Add] {
            for (file_path, object_id) in migration.actions_of(action) {
                let object_id = object_id
                    .as_ref()
                    .with_context(|| format!("No blob planned for file: {:?}", file_path))?;
                let data = migration.load_blob_data(object_id)?;
                self.write_file(file_path, &data)?;
            }
        }

        Ok(())
    }
}
