//! Repository discovery and database bootstrapping
//!
//! Finds the enclosing git repository, knows where gitbm keeps its files
//! inside the git directory, and creates or destroys the database.

use std::path::{Path, PathBuf};
use crate::config::{self, GitbmConfig};
use crate::storage::Store;
use crate::{Error, Result};

#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
    git_dir: PathBuf,
    /// Shared git directory; differs from `git_dir` in linked worktrees
    common_dir: PathBuf,
}

impl Workspace {
    /// Find the repository containing `start`, walking up parent directories.
    pub fn discover(start: &Path) -> Result<Self> {
        let start = start.canonicalize().unwrap_or_else(|_| start.to_path_buf());
        for dir in start.ancestors() {
            if let Some(git_dir) = resolve_git_dir(dir)? {
                let common_dir = resolve_common_dir(&git_dir)?;
                tracing::debug!("found repository at {}", dir.display());
                return Ok(Self {
                    root: dir.to_path_buf(),
                    git_dir,
                    common_dir,
                });
            }
        }
        Err(Error::NotAGitRepository(start))
    }

    /// Discover from the process working directory
    pub fn from_current_dir() -> Result<Self> {
        let cwd = std::env::current_dir()?;
        Self::discover(&cwd)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    /// Where gitbm keeps its files. Worktrees of one repository share it,
    /// as they share branches.
    pub fn common_dir(&self) -> &Path {
        &self.common_dir
    }

    pub fn database_path(&self) -> PathBuf {
        config::default_database_path_in(&self.common_dir)
    }

    pub fn config_path(&self) -> PathBuf {
        config::default_config_path_in(&self.common_dir)
    }

    /// Default hooks directory, used when git cannot be asked.
    pub fn hooks_dir(&self) -> PathBuf {
        self.common_dir.join("hooks")
    }

    pub fn is_initialized(&self) -> bool {
        self.database_path().exists()
    }

    pub fn config(&self) -> Result<GitbmConfig> {
        config::load_config(&self.config_path())
    }

    /// Create the database. Refuses to touch an existing one.
    pub fn initialize(&self) -> Result<PathBuf> {
        let path = self.database_path();
        if path.exists() {
            return Err(Error::AlreadyInitialized(path));
        }
        Store::initialize(&path)?;
        tracing::info!("initialized store at {}", path.display());
        Ok(path)
    }

    /// Open the store, applying the repository's config.
    pub fn open_store(&self) -> Result<Store> {
        let config = self.config()?;
        let store = Store::open_with_busy_timeout(&self.database_path(), config.busy_timeout())?;
        Ok(store.with_recent_frequent_order(config.recent_frequent_order()))
    }

    /// Delete the database file and everything in it.
    pub fn destroy(&self) -> Result<()> {
        let path = self.database_path();
        if !path.exists() {
            return Err(Error::StoreNotInitialized(path));
        }
        std::fs::remove_file(&path)?;
        tracing::info!("removed {}", path.display());
        Ok(())
    }
}

/// `.git` is usually a directory; in worktrees and submodules it is a file
/// holding `gitdir: <path>`.
fn resolve_git_dir(dir: &Path) -> Result<Option<PathBuf>> {
    let dot_git = dir.join(".git");
    if dot_git.is_dir() {
        return Ok(Some(dot_git));
    }
    if dot_git.is_file() {
        let contents = std::fs::read_to_string(&dot_git)?;
        if let Some(target) = contents.lines().find_map(|l| l.strip_prefix("gitdir:")) {
            let target = Path::new(target.trim());
            let resolved = if target.is_absolute() {
                target.to_path_buf()
            } else {
                dir.join(target)
            };
            return Ok(Some(resolved));
        }
    }
    Ok(None)
}

/// A linked worktree's git dir holds a `commondir` file pointing (usually
/// relatively) at the main repository's git dir.
fn resolve_common_dir(git_dir: &Path) -> Result<PathBuf> {
    let commondir = git_dir.join("commondir");
    if !commondir.is_file() {
        return Ok(git_dir.to_path_buf());
    }
    let contents = std::fs::read_to_string(&commondir)?;
    let target = Path::new(contents.trim());
    let resolved = if target.is_absolute() {
        target.to_path_buf()
    } else {
        git_dir.join(target)
    };
    Ok(resolved.canonicalize().unwrap_or(resolved))
}
