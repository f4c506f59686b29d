//! Repository error taxonomy
//!
//! Every failure a command can report to the user is a [`RepositoryError`].
//! The `Display` text of each variant is the exact line printed by the
//! command-line tool, so these strings are part of the external contract.
//!
//! Operations still return `anyhow::Result`; a `RepositoryError` travels inside
//! the `anyhow::Error` and can be recovered with `downcast_ref`.

use thiserror::Error;

/// Coarse classification of a [`RepositoryError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad user input; nothing was changed
    UserInput,
    /// Unknown commit, branch or path; nothing was changed
    NotFound,
    /// The repository state forbids the operation; nothing was changed
    StateConflict,
    /// Disk failure or unreadable persisted state
    IoFailure,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("A Gitlet version-control system already exists in the current directory.")]
    AlreadyInitialized,

    #[error("Not in an initialized Gitlet directory.")]
    NotInitialized,

    #[error("File does not exist.")]
    FileNotFound,

    #[error("Please enter a commit message.")]
    EmptyMessage,

    #[error("No changes added to the commit.")]
    NothingStaged,

    #[error("No reason to remove the file.")]
    NothingToRemove,

    #[error("Invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("A branch with that name already exists.")]
    BranchAlreadyExists,

    #[error("No such branch exists.")]
    NoSuchBranch,

    #[error("A branch with that name does not exist.")]
    BranchNotFound,

    #[error("Cannot remove the current branch.")]
    CannotRemoveCurrentBranch,

    #[error("No need to checkout the current branch.")]
    AlreadyCurrentBranch,

    #[error("No commit with that id exists.")]
    CommitNotFound,

    #[error("Ambiguous commit id: {0}")]
    AmbiguousId(String),

    #[error("File does not exist in that commit.")]
    FileNotFoundInCommit,

    #[error("Found no commit with that message.")]
    NoCommitWithMessage,

    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedFileConflict,

    #[error("You have uncommitted changes.")]
    UncommittedChanges,

    #[error("Cannot merge a branch with itself.")]
    CannotMergeSelf,

    #[error("Object not found: {0}")]
    ObjectNotFound(String),

    #[error("Corrupt object: {0}")]
    CorruptObject(String),
}

impl RepositoryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RepositoryError::AlreadyInitialized
            | RepositoryError::NotInitialized
            | RepositoryError::FileNotFound
            | RepositoryError::EmptyMessage
            | RepositoryError::NothingStaged
            | RepositoryError::NothingToRemove
            | RepositoryError::InvalidBranchName(_) => ErrorKind::UserInput,
            RepositoryError::NoSuchBranch
            | RepositoryError::BranchNotFound
            | RepositoryError::CommitNotFound
            | RepositoryError::AmbiguousId(_)
            | RepositoryError::FileNotFoundInCommit
            | RepositoryError::NoCommitWithMessage
            | RepositoryError::ObjectNotFound(_) => ErrorKind::NotFound,
            RepositoryError::BranchAlreadyExists
            | RepositoryError::CannotRemoveCurrentBranch
            | RepositoryError::AlreadyCurrentBranch
            | RepositoryError::UntrackedFileConflict
            | RepositoryError::UncommittedChanges
            | RepositoryError::CannotMergeSelf => ErrorKind::StateConflict,
            RepositoryError::CorruptObject(_) => ErrorKind::IoFailure,
        }
    }

    /// Recover the repository error carried by an `anyhow::Error`, if any
    pub fn find(error: &anyhow::Error) -> Option<&RepositoryError> {
        error.downcast_ref::<RepositoryError>()
    }
}
