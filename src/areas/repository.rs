use crate::areas::database::Database;
use crate::areas::refs::{HEAD_KEY, Refs};
use crate::areas::staging::StagingArea;
use crate::areas::storage::{FileStorage, Storage};
use crate::areas::workspace::{REPOSITORY_DIR, Workspace};
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use std::cell::{RefCell, RefMut};
use std::path::Path;
use std::rc::Rc;

/// Context every command operates on
///
/// Holds the object store, the refs and the staging area over one shared
/// storage backend, plus the working tree and the sink for command output.
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    storage: Rc<dyn Storage>,
    staging: RefCell<StagingArea>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    /// Open the repository rooted at `path`, persisted under `<path>/.gitlet`
    pub fn new(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = Path::new(path).canonicalize()?;
        let storage = FileStorage::new(path.join(REPOSITORY_DIR).into_boxed_path());

        Ok(Self::with_storage(&path, Rc::new(storage), writer))
    }

    /// Open a repository whose working tree is `path` over an arbitrary backend
    pub fn with_storage(
        path: &Path,
        storage: Rc<dyn Storage>,
        writer: Box<dyn std::io::Write>,
    ) -> Self {
        Repository {
            path: path.to_path_buf().into_boxed_path(),
            writer: RefCell::new(writer),
            staging: RefCell::new(StagingArea::new(storage.clone())),
            database: Database::new(storage.clone()),
            workspace: Workspace::new(path.to_path_buf().into_boxed_path()),
            refs: Refs::new(storage.clone()),
            storage,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_initialized(&self) -> anyhow::Result<bool> {
        self.storage.exists(HEAD_KEY)
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    /// The staging area; commands rehydrate it first and write it back last
    pub fn staging(&'_ self) -> RefMut<'_, StagingArea> {
        self.staging.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    /// Id and contents of the commit the current branch points at
    pub fn head_commit(&self) -> anyhow::Result<(ObjectId, Commit)> {
        let head_oid = self.refs.head_oid()?;
        let head_commit = self.database.get_commit(&head_oid)?;

        Ok((head_oid, head_commit))
    }
}
