//! Git collaborator
//!
//! Everything gitbm needs from git goes through the `git` binary, plus the
//! post-checkout hook that feeds checkout history back into the store.

use std::path::{Path, PathBuf};
use std::process::Command;
use crate::{Error, Result};

pub const POST_CHECKOUT_HOOK: &str = "post-checkout";

const HOOK_BEGIN: &str = "# >>> gitbm >>>";
const HOOK_END: &str = "# <<< gitbm <<<";

/// What gitbm asks of the version-control tool.
pub trait VersionControl {
    /// Name of the checked-out branch
    fn current_branch_name(&self) -> Result<String>;

    fn checkout(&self, branch: &str) -> Result<()>;

    /// Subject line of the latest commit on HEAD
    fn latest_commit_message(&self) -> Result<String>;

    /// Directory git runs hooks from. Honors `core.hooksPath` and resolves to
    /// the main repository's hooks inside linked worktrees.
    fn hooks_dir(&self) -> Result<PathBuf>;
}

/// [`VersionControl`] backed by the `git` command line.
pub struct GitCli {
    repo_root: PathBuf,
}

impl GitCli {
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
        }
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        tracing::debug!("git {}", args.join(" "));
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo_root)
            .output()
            .map_err(|e| Error::Git(format!("failed to run git: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Git(format!("`git {}` failed: {}", args.join(" "), stderr.trim())));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl VersionControl for GitCli {
    fn current_branch_name(&self) -> Result<String> {
        self.run(&["symbolic-ref", "-q", "--short", "HEAD"])
            .map_err(|_| Error::Git("HEAD is detached; check out a branch first".to_string()))
    }

    fn checkout(&self, branch: &str) -> Result<()> {
        self.run(&["checkout", branch]).map(|_| ())
    }

    fn latest_commit_message(&self) -> Result<String> {
        self.run(&["log", "-1", "--pretty=%s"])
    }

    fn hooks_dir(&self) -> Result<PathBuf> {
        let path = PathBuf::from(self.run(&["rev-parse", "--git-path", "hooks"])?);
        if path.is_absolute() {
            Ok(path)
        } else {
            Ok(self.repo_root.join(path))
        }
    }
}

/// Outcome of [`install_post_checkout_hook`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookInstall {
    Created,
    /// An existing hook was kept and the gitbm block appended to it
    Appended,
    AlreadyInstalled,
}

fn hook_block() -> String {
    format!(
        r#"{begin}
# Record branch checkouts for `gitbm recent` / `gitbm frequent`.
# $3 is 1 for branch checkouts and 0 for file checkouts.
# A detached HEAD (commit checkout, rebase step) has no branch to record.
if [ "$3" = "1" ]; then
    gitbm_branch="$(git symbolic-ref -q --short HEAD)"
    if [ -n "$gitbm_branch" ]; then
        gitbm track-checkout "$gitbm_branch" "$(git log -1 --pretty=%s)" >/dev/null 2>&1 || true
    fi
fi
{end}
"#,
        begin = HOOK_BEGIN,
        end = HOOK_END
    )
}

/// Install the post-checkout hook in `hooks_dir`, leaving any other hook
/// content in place. Installing twice is a no-op.
pub fn install_post_checkout_hook(hooks_dir: &Path) -> Result<HookInstall> {
    std::fs::create_dir_all(hooks_dir)?;
    let path = hooks_dir.join(POST_CHECKOUT_HOOK);

    let outcome = if path.exists() {
        let existing = std::fs::read_to_string(&path)?;
        if existing.contains(HOOK_BEGIN) {
            return Ok(HookInstall::AlreadyInstalled);
        }
        let mut content = existing;
        if !content.ends_with('\n') {
            content.push('\n');
        }
        content.push('\n');
        content.push_str(&hook_block());
        std::fs::write(&path, content)?;
        HookInstall::Appended
    } else {
        std::fs::write(&path, format!("#!/bin/sh\n\n{}", hook_block()))?;
        HookInstall::Created
    };

    make_executable(&path)?;
    tracing::debug!(?outcome, "installed hook at {}", path.display());
    Ok(outcome)
}

/// Remove the gitbm block from the post-checkout hook. The file is deleted
/// when nothing but the shebang remains. Returns whether anything changed.
pub fn uninstall_post_checkout_hook(hooks_dir: &Path) -> Result<bool> {
    let path = hooks_dir.join(POST_CHECKOUT_HOOK);
    if !path.exists() {
        return Ok(false);
    }

    let existing = std::fs::read_to_string(&path)?;
    let (Some(start), Some(end)) = (existing.find(HOOK_BEGIN), existing.find(HOOK_END)) else {
        return Ok(false);
    };
    let end = end + HOOK_END.len();
    let end = if existing[end..].starts_with('\n') { end + 1 } else { end };

    let remaining = format!("{}{}", &existing[..start], &existing[end..]);
    let is_empty = remaining
        .lines()
        .all(|line| line.trim().is_empty() || line.starts_with("#!"));

    if is_empty {
        std::fs::remove_file(&path)?;
    } else {
        std::fs::write(&path, remaining.trim_end().to_string() + "\n")?;
    }
    Ok(true)
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = std::fs::metadata(path)?.permissions();
    perms.set_mode(perms.mode() | 0o755);
    std::fs::set_permissions(path, perms)?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}
