//! Command handlers behind the CLI verbs
//!
//! Each handler opens the store for the duration of one call. Git access and
//! interactive selection come in through [`Context`] so handlers can be run
//! against fakes.

use std::path::PathBuf;
use anyhow::Context as _;
use crate::git::{self, HookInstall, VersionControl};
use crate::model::{BookmarkGroup, Branch, BranchCheckout, EntityKind, GroupId, UNSET_GROUP_ID};
use crate::output::{emit_success, OutputMode};
use crate::select::FuzzySelect;
use crate::storage::{Ranking, Store};
use crate::ui::{self, Icons};
use crate::workspace::Workspace;
use crate::{names, Error};

/// Everything a command needs besides its own arguments.
pub struct Context<V, S> {
    pub workspace: Workspace,
    pub git: V,
    pub selector: S,
    pub output: OutputMode,
}

impl<V: VersionControl, S: FuzzySelect> Context<V, S> {
    pub fn new(workspace: Workspace, git: V, selector: S, output: OutputMode) -> Self {
        Self {
            workspace,
            git,
            selector,
            output,
        }
    }

    fn store(&self) -> crate::Result<Store> {
        self.workspace.open_store()
    }

    fn default_limit(&self) -> crate::Result<usize> {
        Ok(self.workspace.config()?.default_limit())
    }

    fn hooks_dir(&self) -> PathBuf {
        match self.git.hooks_dir() {
            Ok(dir) => dir,
            Err(e) => {
                tracing::debug!("git did not report a hooks dir ({}), using the default", e);
                self.workspace.hooks_dir()
            }
        }
    }
}

/// Id of the current group, or [`Error::NoCurrentGroup`].
fn require_current_group(store: &Store) -> crate::Result<GroupId> {
    match store.current().get_id()? {
        UNSET_GROUP_ID => Err(Error::NoCurrentGroup),
        id => Ok(id),
    }
}

fn pick_group<'a, S: FuzzySelect>(selector: &S, groups: &'a [BookmarkGroup], prompt: &str) -> crate::Result<&'a BookmarkGroup> {
    if groups.is_empty() {
        return Err(Error::NothingToSelect(EntityKind::BookmarkGroup));
    }
    selector.select(groups, |g| g.name.clone(), prompt)
}

fn pick_branch<'a, S: FuzzySelect>(selector: &S, branches: &'a [Branch], prompt: &str) -> crate::Result<&'a Branch> {
    if branches.is_empty() {
        return Err(Error::NothingToSelect(EntityKind::Branch));
    }
    selector.select(branches, Branch::label, prompt)
}

// ========== Setup ==========

pub fn run_init<V: VersionControl, S: FuzzySelect>(ctx: &Context<V, S>, no_hook: bool) -> anyhow::Result<()> {
    let path = ctx.workspace.initialize()?;
    ui::success("gitbm initialized successfully. Ready to use!");
    ui::info(&format!("{} Database: {}", Icons::DATABASE, path.display()));

    let config = ctx.workspace.config()?;
    if no_hook || !config.install_hook() {
        ui::warn("post-checkout hook not installed; `recent` and `frequent` will stay empty");
        return Ok(());
    }

    let hooks_dir = ctx.hooks_dir();
    match git::install_post_checkout_hook(&hooks_dir).context("installing post-checkout hook")? {
        HookInstall::Created => ui::info(&format!("{} Installed post-checkout hook", Icons::HOOK)),
        HookInstall::Appended => ui::info(&format!("{} Added checkout tracking to the existing post-checkout hook", Icons::HOOK)),
        HookInstall::AlreadyInstalled => ui::info(&format!("{} post-checkout hook already installed", Icons::HOOK)),
    }
    Ok(())
}

pub fn run_destroy<V: VersionControl, S: FuzzySelect>(ctx: &Context<V, S>, force: bool) -> anyhow::Result<()> {
    if !ctx.workspace.is_initialized() {
        return Err(Error::StoreNotInitialized(ctx.workspace.database_path()).into());
    }
    if !force && !ui::confirm("Destroy all gitbm data? This cannot be undone.")? {
        ui::info("Operation cancelled.");
        return Ok(());
    }

    ctx.workspace.destroy()?;
    if git::uninstall_post_checkout_hook(&ctx.hooks_dir())? {
        tracing::debug!("removed post-checkout hook");
    }
    ui::success("gitbm data has been destroyed.");
    Ok(())
}

// ========== Bookmark groups ==========

pub fn run_create<V: VersionControl, S: FuzzySelect>(ctx: &Context<V, S>, name: Option<String>) -> anyhow::Result<()> {
    let name = match name {
        Some(name) => name,
        None => {
            let name = names::random_group_name();
            ui::info(&format!("No bookmark group name given. Using '{}'", name));
            name
        }
    };

    let store = ctx.store()?;
    let id = store.groups().create(&name)?;
    let is_current = store.current().get_id()? == id;

    ui::success(&format!("Bookmark group created: {}", name));
    if is_current {
        ui::info(&format!("'{}' is now the current bookmark group", name));
    }
    emit_success(ctx.output, "create", serde_json::json!({ "id": id, "name": name, "current": is_current }))
}

pub fn run_list_groups<V: VersionControl, S: FuzzySelect>(ctx: &Context<V, S>) -> anyhow::Result<()> {
    let store = ctx.store()?;
    let groups = store.groups().list()?;
    let current = store.current().get_id()?;

    if !ctx.output.is_human() {
        let data: Vec<_> = groups
            .iter()
            .map(|g| serde_json::json!({ "id": g.id, "name": g.name, "current": g.id == current }))
            .collect();
        return emit_success(ctx.output, "list-groups", serde_json::Value::Array(data));
    }

    if groups.is_empty() {
        ui::info("No bookmark groups found. Use `gitbm create` to create one.");
        return Ok(());
    }
    ui::header("Bookmark groups");
    ui::plain(&ui::groups_table(&groups, current));
    Ok(())
}

pub fn run_switch<V: VersionControl, S: FuzzySelect>(ctx: &Context<V, S>, name: Option<String>) -> anyhow::Result<()> {
    let store = ctx.store()?;
    let group = match name {
        Some(name) => store.groups().get_by_name(&name)?,
        None => {
            let groups = store.groups().list()?;
            pick_group(&ctx.selector, &groups, "Switch to bookmark group")?.clone()
        }
    };

    store.current().set_id(group.id)?;
    ui::success(&format!("Bookmark group switched to: {}*", group.name));
    emit_success(ctx.output, "switch", serde_json::json!({ "id": group.id, "name": group.name }))
}

/// Which group `gitbm delete` should remove
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
    Named(String),
    Current,
    Interactive,
}

pub fn run_delete<V: VersionControl, S: FuzzySelect>(ctx: &Context<V, S>, target: DeleteTarget) -> anyhow::Result<()> {
    let store = ctx.store()?;
    let name = match target {
        DeleteTarget::Named(name) => name,
        DeleteTarget::Current => store
            .groups()
            .get_current()?
            .map(|g| g.name)
            .ok_or(Error::NoCurrentGroup)?,
        DeleteTarget::Interactive => {
            let groups = store.groups().list()?;
            pick_group(&ctx.selector, &groups, "Delete bookmark group")?.name.clone()
        }
    };

    let was_current = store.groups().get_current()?.is_some_and(|g| g.name == name);
    store.groups().delete(&name)?;

    ui::success(&format!("{} Bookmark group deleted: {}", Icons::DEL, name));
    if was_current {
        ui::warn("No bookmark group is current now. Use `gitbm switch` to pick one.");
    }
    emit_success(ctx.output, "delete", serde_json::json!({ "name": name, "was_current": was_current }))
}

pub fn run_show<V: VersionControl, S: FuzzySelect>(ctx: &Context<V, S>) -> anyhow::Result<()> {
    let store = ctx.store()?;
    let current = store.groups().get_current()?;
    let stats = store.stats()?;

    if !ctx.output.is_human() {
        return emit_success(
            ctx.output,
            "show",
            serde_json::json!({ "current": current.as_ref().map(|g| &g.name), "stats": stats }),
        );
    }

    match current {
        Some(group) => {
            let branches = store.branches().list_by_group(group.id)?.len();
            ui::success(&format!("Current bookmark group: {}*", group.name));
            ui::plain(&ui::muted(&format!("  {} bookmarked branches", branches)));
        }
        None => ui::info("No bookmark group set. Use `gitbm create` or `gitbm switch`."),
    }
    tracing::debug!("{}", stats);
    Ok(())
}

// ========== Branches ==========

pub fn run_add<V: VersionControl, S: FuzzySelect>(
    ctx: &Context<V, S>,
    alias: Option<String>,
    branch: Option<String>,
) -> anyhow::Result<()> {
    let branch = match branch {
        Some(branch) => branch,
        None => ctx.git.current_branch_name()?,
    };
    if alias.is_none() {
        ui::info("No branch alias specified. Using the branch name as the alias.");
    }

    let store = ctx.store()?;
    let group_id = require_current_group(&store)?;
    let created = store.branches().create(group_id, &branch, alias.as_deref())?;

    ui::success(&format!("{} Branch added: {}", Icons::BRANCH, created.label()));
    emit_success(ctx.output, "add", serde_json::to_value(&created)?)
}

pub fn run_list_branches<V: VersionControl, S: FuzzySelect>(ctx: &Context<V, S>) -> anyhow::Result<()> {
    let store = ctx.store()?;
    let group_id = require_current_group(&store)?;
    let branches = store.branches().list_by_group(group_id)?;

    if !ctx.output.is_human() {
        return emit_success(ctx.output, "list-branches", serde_json::to_value(&branches)?);
    }

    if branches.is_empty() {
        ui::info("No branches found. Use `gitbm add` to add a branch.");
        return Ok(());
    }
    ui::plain(&ui::branches_table(&branches));
    Ok(())
}

/// Branch named by `gitbm remove --branch`: a name, or `current` for the
/// checked-out branch
pub const CURRENT_BRANCH_KEYWORD: &str = "current";

pub fn run_remove<V: VersionControl, S: FuzzySelect>(
    ctx: &Context<V, S>,
    name: Option<String>,
    branch_flag: Option<String>,
) -> anyhow::Result<()> {
    let store = ctx.store()?;
    let group_id = require_current_group(&store)?;

    let name = match (branch_flag, name) {
        (Some(flag), _) if flag == CURRENT_BRANCH_KEYWORD => {
            let branch = ctx.git.current_branch_name()?;
            ui::info(&format!("Using current branch: {}", branch));
            branch
        }
        (Some(flag), _) => flag,
        (None, Some(name)) => name,
        (None, None) => {
            let branches = store.branches().list_by_group(group_id)?;
            pick_branch(&ctx.selector, &branches, "Select a branch to remove")?.name.clone()
        }
    };

    // Removing is silent for unknown names; check first so the user hears about typos
    let branch = store.branches().get_by_name(group_id, &name)?;
    store.branches().remove(branch.bookmark_group_id, &branch.name)?;

    ui::success(&format!("Branch '{}' removed from the current bookmark group", name));
    emit_success(ctx.output, "remove", serde_json::json!({ "name": name }))
}

pub fn run_checkout<V: VersionControl, S: FuzzySelect>(ctx: &Context<V, S>, name: Option<String>) -> anyhow::Result<()> {
    let store = ctx.store()?;
    let group_id = require_current_group(&store)?;

    let branch = match name {
        Some(name) => store.branches().get_by_name(group_id, &name)?,
        None => {
            let branches = store.branches().list_by_group(group_id)?;
            pick_branch(&ctx.selector, &branches, "Select a branch")?.clone()
        }
    };
    drop(store);

    ctx.git.checkout(&branch.name)?;
    ui::success(&format!("Checked out branch: {}", branch.name));
    emit_success(ctx.output, "checkout", serde_json::json!({ "name": branch.name }))
}

// ========== Checkout history ==========

/// Options shared by `recent` and `frequent`
#[derive(Debug, Clone, Copy, Default)]
pub struct HistoryOptions {
    pub limit: Option<usize>,
    pub reverse: bool,
    /// Print the ranking instead of opening the picker
    pub list_only: bool,
}

pub fn run_history<V: VersionControl, S: FuzzySelect>(
    ctx: &Context<V, S>,
    ranking: Ranking,
    options: HistoryOptions,
) -> anyhow::Result<()> {
    let limit = match options.limit {
        Some(limit) => limit,
        None => ctx.default_limit()?,
    };

    let store = ctx.store()?;
    let rows = store.checkouts().ranked(ranking, limit, options.reverse)?;
    drop(store);

    let command = match ranking {
        Ranking::Recent => "recent",
        Ranking::Frequent => "frequent",
        Ranking::RecentFrequent => "recent-frequent",
    };

    if !ctx.output.is_human() {
        return emit_success(ctx.output, command, serde_json::to_value(&rows)?);
    }
    if rows.is_empty() {
        ui::info("No checkout history yet. It is recorded by the post-checkout hook installed by `gitbm init`.");
        return Ok(());
    }
    if options.list_only {
        let icon = if ranking == Ranking::Frequent { Icons::FIRE } else { Icons::CLOCK };
        ui::header(&format!("{} {} branches", icon, command));
        ui::plain(&ui::checkouts_table(&rows));
        return Ok(());
    }

    let label: fn(&BranchCheckout) -> String = match ranking {
        Ranking::Recent => BranchCheckout::label,
        Ranking::Frequent | Ranking::RecentFrequent => BranchCheckout::label_with_count,
    };
    let selected = ctx.selector.select(&rows, label, "Select a branch to checkout to")?;

    ctx.git.checkout(&selected.name)?;
    ui::success(&format!("Checked out branch: {}", selected.name));
    Ok(())
}

pub fn run_reset_checkouts<V: VersionControl, S: FuzzySelect>(ctx: &Context<V, S>) -> anyhow::Result<()> {
    let store = ctx.store()?;
    store.checkouts().delete_all()?;
    ui::success("Checkouts data has been reset");
    emit_success(ctx.output, "reset-checkouts", serde_json::Value::Null)
}

/// What `git rev-parse --abbrev-ref HEAD` prints on a detached HEAD
const DETACHED_HEAD: &str = "HEAD";

/// Called by the post-checkout hook; prints nothing on success.
pub fn run_track_checkout<V: VersionControl, S: FuzzySelect>(
    ctx: &Context<V, S>,
    branch: &str,
    message: Option<&str>,
) -> anyhow::Result<()> {
    if branch == DETACHED_HEAD {
        tracing::debug!("detached HEAD, nothing to track");
        return Ok(());
    }
    let message = match message {
        Some(message) => message.to_string(),
        None => ctx.git.latest_commit_message()?,
    };
    let store = ctx.store()?;
    store.checkouts().upsert(branch, &message)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct FakeGit {
        branch: String,
        checkouts: RefCell<Vec<String>>,
        /// `None` behaves like a git that cannot report its hooks dir
        hooks: Option<PathBuf>,
    }

    impl FakeGit {
        fn on(branch: &str) -> Self {
            Self {
                branch: branch.to_string(),
                checkouts: RefCell::new(Vec::new()),
                hooks: None,
            }
        }
    }

    impl VersionControl for FakeGit {
        fn current_branch_name(&self) -> crate::Result<String> {
            Ok(self.branch.clone())
        }

        fn checkout(&self, branch: &str) -> crate::Result<()> {
            self.checkouts.borrow_mut().push(branch.to_string());
            Ok(())
        }

        fn latest_commit_message(&self) -> crate::Result<String> {
            Ok("latest".to_string())
        }

        fn hooks_dir(&self) -> crate::Result<PathBuf> {
            self.hooks.clone().ok_or_else(|| Error::Git("no hooks dir".to_string()))
        }
    }

    /// Picks the item whose label equals `label`, or cancels
    struct FakeSelector {
        label: Option<String>,
    }

    impl FuzzySelect for FakeSelector {
        fn select<'a, T, F>(&self, items: &'a [T], label: F, _prompt: &str) -> crate::Result<&'a T>
        where
            F: Fn(&T) -> String,
        {
            let wanted = self.label.as_deref().ok_or(Error::SelectionCancelled)?;
            items
                .iter()
                .find(|item| label(item) == wanted)
                .ok_or(Error::SelectionCancelled)
        }
    }

    fn setup(branch: &str, pick: Option<&str>) -> (tempfile::TempDir, Context<FakeGit, FakeSelector>) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(".git")).unwrap();
        let workspace = Workspace::discover(dir.path()).unwrap();
        let ctx = Context::new(
            workspace,
            FakeGit::on(branch),
            FakeSelector { label: pick.map(str::to_string) },
            OutputMode::Human,
        );
        run_init(&ctx, true).unwrap();
        (dir, ctx)
    }

    fn gitbm_error(err: &anyhow::Error) -> &Error {
        err.downcast_ref::<Error>().unwrap()
    }

    #[test]
    fn test_init_twice_fails() {
        let (_dir, ctx) = setup("main", None);
        let err = run_init(&ctx, true).unwrap_err();
        assert!(matches!(gitbm_error(&err), Error::AlreadyInitialized(_)));
    }

    #[test]
    fn test_init_installs_hook() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(".git")).unwrap();
        let workspace = Workspace::discover(dir.path()).unwrap();
        let ctx = Context::new(workspace, FakeGit::on("main"), FakeSelector { label: None }, OutputMode::Human);

        run_init(&ctx, false).unwrap();
        assert!(ctx.workspace.hooks_dir().join(git::POST_CHECKOUT_HOOK).exists());

        run_destroy(&ctx, true).unwrap();
        assert!(!ctx.workspace.hooks_dir().join(git::POST_CHECKOUT_HOOK).exists());
        assert!(!ctx.workspace.is_initialized());
    }

    #[test]
    fn test_init_installs_hook_where_git_runs_hooks() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(".git")).unwrap();
        let custom_hooks = dir.path().join("shared-hooks");
        let workspace = Workspace::discover(dir.path()).unwrap();
        let git = FakeGit {
            hooks: Some(custom_hooks.clone()),
            ..FakeGit::on("main")
        };
        let ctx = Context::new(workspace, git, FakeSelector { label: None }, OutputMode::Human);

        run_init(&ctx, false).unwrap();
        assert!(custom_hooks.join(git::POST_CHECKOUT_HOOK).exists());
        assert!(!ctx.workspace.hooks_dir().join(git::POST_CHECKOUT_HOOK).exists());

        run_destroy(&ctx, true).unwrap();
        assert!(!custom_hooks.join(git::POST_CHECKOUT_HOOK).exists());
    }

    #[test]
    fn test_add_list_remove_flow() {
        let (_dir, ctx) = setup("feature/x", None);
        run_create(&ctx, Some("alpha".to_string())).unwrap();
        run_add(&ctx, Some("FX".to_string()), None).unwrap();

        let store = ctx.store().unwrap();
        let group = store.groups().get_current().unwrap().unwrap();
        let branches = store.branches().list_by_group(group.id).unwrap();
        assert_eq!(branches.len(), 1);
        assert_eq!(branches[0].name, "feature/x");
        assert_eq!(branches[0].alias.as_deref(), Some("FX"));
        drop(store);

        run_remove(&ctx, None, Some(CURRENT_BRANCH_KEYWORD.to_string())).unwrap();
        let store = ctx.store().unwrap();
        assert!(store.branches().list_by_group(group.id).unwrap().is_empty());
    }

    #[test]
    fn test_add_without_group() {
        let (_dir, ctx) = setup("main", None);
        let err = run_add(&ctx, None, None).unwrap_err();
        assert!(matches!(gitbm_error(&err), Error::NoCurrentGroup));
    }

    #[test]
    fn test_remove_unknown_branch_reports_not_found() {
        let (_dir, ctx) = setup("main", None);
        run_create(&ctx, Some("alpha".to_string())).unwrap();
        let err = run_remove(&ctx, Some("ghost".to_string()), None).unwrap_err();
        assert!(matches!(gitbm_error(&err), Error::NotFound { .. }));
    }

    #[test]
    fn test_switch_interactive() {
        let (_dir, ctx) = setup("main", Some("beta"));
        run_create(&ctx, Some("alpha".to_string())).unwrap();
        run_create(&ctx, Some("beta".to_string())).unwrap();

        run_switch(&ctx, None).unwrap();
        let store = ctx.store().unwrap();
        assert_eq!(store.groups().get_current().unwrap().unwrap().name, "beta");
    }

    #[test]
    fn test_switch_cancelled() {
        let (_dir, ctx) = setup("main", None);
        run_create(&ctx, Some("alpha".to_string())).unwrap();
        let err = run_switch(&ctx, None).unwrap_err();
        assert!(gitbm_error(&err).is_cancelled());
    }

    #[test]
    fn test_delete_current_group() {
        let (_dir, ctx) = setup("main", None);
        run_create(&ctx, Some("alpha".to_string())).unwrap();
        run_create(&ctx, Some("beta".to_string())).unwrap();

        run_delete(&ctx, DeleteTarget::Current).unwrap();
        let store = ctx.store().unwrap();
        assert!(store.groups().get_current().unwrap().is_none());
        assert_eq!(store.groups().list().unwrap().len(), 1);
        drop(store);

        let err = run_delete(&ctx, DeleteTarget::Current).unwrap_err();
        assert!(matches!(gitbm_error(&err), Error::NoCurrentGroup));
    }

    #[test]
    fn test_checkout_from_group() {
        let (_dir, ctx) = setup("main", Some("feature/y -- Y"));
        run_create(&ctx, Some("alpha".to_string())).unwrap();
        run_add(&ctx, None, Some("main".to_string())).unwrap();
        run_add(&ctx, Some("Y".to_string()), Some("feature/y".to_string())).unwrap();

        run_checkout(&ctx, Some("main".to_string())).unwrap();
        run_checkout(&ctx, None).unwrap();
        assert_eq!(*ctx.git.checkouts.borrow(), vec!["main", "feature/y"]);

        let err = run_checkout(&ctx, Some("unknown".to_string())).unwrap_err();
        assert!(matches!(gitbm_error(&err), Error::NotFound { .. }));
    }

    #[test]
    fn test_empty_group_has_nothing_to_select() {
        let (_dir, ctx) = setup("main", Some("main"));
        run_create(&ctx, Some("alpha".to_string())).unwrap();

        for err in [run_checkout(&ctx, None).unwrap_err(), run_remove(&ctx, None, None).unwrap_err()] {
            assert!(matches!(gitbm_error(&err), Error::NothingToSelect(EntityKind::Branch)));
        }
        assert!(ctx.git.checkouts.borrow().is_empty());
    }

    #[test]
    fn test_track_checkout_ignores_detached_head() {
        let (_dir, ctx) = setup("main", None);
        run_track_checkout(&ctx, "HEAD", Some("rebase step")).unwrap();
        run_track_checkout(&ctx, "main", Some("init")).unwrap();

        let store = ctx.store().unwrap();
        let rows = store.checkouts().get_recent(10, false).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "main");
    }

    #[test]
    fn test_track_and_pick_recent() {
        let (_dir, ctx) = setup("main", Some("dev -- wip"));
        run_track_checkout(&ctx, "main", Some("init")).unwrap();
        run_track_checkout(&ctx, "dev", Some("wip")).unwrap();

        run_history(&ctx, Ranking::Recent, HistoryOptions::default()).unwrap();
        assert_eq!(*ctx.git.checkouts.borrow(), vec!["dev"]);

        run_reset_checkouts(&ctx).unwrap();
        let store = ctx.store().unwrap();
        assert_eq!(store.checkouts().count().unwrap(), 0);
    }

    #[test]
    fn test_history_list_only_does_not_checkout() {
        let (_dir, ctx) = setup("main", Some("main -- 2 -- again"));
        run_track_checkout(&ctx, "main", Some("init")).unwrap();
        run_track_checkout(&ctx, "main", Some("again")).unwrap();

        let options = HistoryOptions { limit: Some(5), reverse: false, list_only: true };
        run_history(&ctx, Ranking::Frequent, options).unwrap();
        assert!(ctx.git.checkouts.borrow().is_empty());

        run_history(&ctx, Ranking::Frequent, HistoryOptions::default()).unwrap();
        assert_eq!(*ctx.git.checkouts.borrow(), vec!["main"]);
    }

    #[test]
    fn test_track_checkout_reads_message_from_git() {
        let (_dir, ctx) = setup("main", None);
        run_track_checkout(&ctx, "main", None).unwrap();

        let store = ctx.store().unwrap();
        let rows = store.checkouts().get_recent(1, false).unwrap();
        assert_eq!(rows[0].latest_commit_msg, "latest");
    }

    #[test]
    fn test_commands_require_init() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(".git")).unwrap();
        let workspace = Workspace::discover(dir.path()).unwrap();
        let ctx = Context::new(workspace, FakeGit::on("main"), FakeSelector { label: None }, OutputMode::Human);

        let err = run_list_groups(&ctx).unwrap_err();
        assert!(matches!(gitbm_error(&err), Error::StoreNotInitialized(_)));
    }
}
