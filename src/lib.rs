//! # gitbm - git branch bookmarks
//!
//! Organize the branches of a repository into named bookmark groups and jump
//! back to them later.
//!
//! gitbm provides:
//! - SQLite-backed storage living in `<repo>/.git/gitbm.db`
//! - Bookmark groups with a single "current" group
//! - Branch bookmarks (with aliases) scoped to a group
//! - Global checkout history fed by a post-checkout hook, with
//!   recent / frequent / recent-frequent rankings

pub mod model;
pub mod storage;
pub mod workspace;
pub mod git;
pub mod select;
pub mod names;
pub mod ui;
pub mod output;
pub mod config;
pub mod commands;

use std::path::PathBuf;

// Re-exports for convenient access
pub use model::{BookmarkGroup, Branch, BranchCheckout, EntityKind, GroupId, UNSET_GROUP_ID};
pub use storage::Store;

/// Result type alias for gitbm operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for gitbm operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{} is not a git repository", .0.display())]
    NotAGitRepository(PathBuf),

    #[error("gitbm is not initialized for this repository ({}). Run `gitbm init` first", .0.display())]
    StoreNotInitialized(PathBuf),

    #[error("gitbm is already initialized ({}). Run `gitbm destroy` and then `gitbm init` to start over", .0.display())]
    AlreadyInitialized(PathBuf),

    #[error("{kind} '{name}' already exists")]
    DuplicateName { kind: EntityKind, name: String },

    #[error("{kind} '{name}' not found")]
    NotFound { kind: EntityKind, name: String },

    #[error("no {} to choose from", .0.plural())]
    NothingToSelect(EntityKind),

    #[error("no bookmark group is set. Use `gitbm create` or `gitbm switch` first")]
    NoCurrentGroup,

    #[error("selection cancelled")]
    SelectionCancelled,

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("git error: {0}")]
    Git(String),

    #[error("config error: {0}")]
    Config(String),
}

impl Error {
    /// Whether this error is the user backing out of a picker.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::SelectionCancelled)
    }
}
