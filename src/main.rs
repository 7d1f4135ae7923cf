//! gitbm CLI - bookmark git branches into groups and jump between them

use clap::{Parser, Subcommand};
use gitbm::commands::{self, Context, DeleteTarget, HistoryOptions};
use gitbm::git::GitCli;
use gitbm::output::{self, OutputMode};
use gitbm::select::TermSelector;
use gitbm::storage::Ranking;
use gitbm::workspace::Workspace;
use gitbm::{ui, Error};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "gitbm")]
#[command(version)]
#[command(about = "Bookmark git branches into groups and jump back to them")]
#[command(long_about = r#"
gitbm helps you bookmark, manage and switch between git branches.

Branches are kept in named bookmark groups; one group is current at a time.
A post-checkout hook records every checkout so `recent` and `frequent` can
take you back to where you were.

Example usage:
  gitbm init
  gitbm create release-work
  gitbm add "the hotfix"
  gitbm checkout
  gitbm recent --limit 5
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print machine-readable JSON instead of human output
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize gitbm for the current repository
    Init {
        /// Do not install the post-checkout hook
        #[arg(long)]
        no_hook: bool,
    },

    /// Create a bookmark group (a random name is used when omitted)
    Create {
        name: Option<String>,
    },

    /// List bookmark groups or branches
    List {
        #[command(subcommand)]
        what: ListCommands,
    },

    /// Switch the current bookmark group
    Switch {
        /// Group to switch to; pick interactively when omitted
        name: Option<String>,
    },

    /// Delete a bookmark group and all its branches
    Delete {
        /// Group to delete; pick interactively when omitted
        name: Option<String>,

        /// Group to delete
        #[arg(short, long, conflicts_with = "name")]
        group: Option<String>,

        /// Delete the current bookmark group
        #[arg(short, long, conflicts_with_all = ["name", "group"])]
        current: bool,
    },

    /// Add a branch to the current bookmark group
    Add {
        /// Alias for the branch (defaults to the branch name)
        alias: Option<String>,

        /// Branch to add (defaults to the checked-out branch)
        #[arg(short, long)]
        branch: Option<String>,
    },

    /// Remove a branch from the current bookmark group
    Remove {
        /// Branch to remove; pick interactively when omitted
        name: Option<String>,

        /// Branch to remove, or `current` for the checked-out branch
        #[arg(short, long, conflicts_with = "name")]
        branch: Option<String>,
    },

    /// Checkout a branch from the current bookmark group
    Checkout {
        /// Branch to checkout; pick interactively when omitted
        name: Option<String>,
    },

    /// Show the current bookmark group
    Show,

    /// Pick from recently checked out branches
    Recent {
        /// `frequent` ranks by checkout count as well as recency
        #[arg(value_parser = ["frequent"])]
        mode: Option<String>,

        #[command(flatten)]
        history: HistoryArgs,
    },

    /// Pick from frequently checked out branches
    Frequent {
        #[command(flatten)]
        history: HistoryArgs,
    },

    /// Reset recorded data
    Reset {
        #[command(subcommand)]
        what: ResetCommands,
    },

    /// Delete the gitbm database and hook for this repository
    Destroy {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Record a checkout (called by the post-checkout hook)
    #[command(hide = true)]
    TrackCheckout {
        branch: String,
        /// Latest commit subject; read from git when omitted
        #[arg(allow_hyphen_values = true)]
        message: Option<String>,
    },
}

#[derive(Subcommand)]
enum ListCommands {
    /// List all bookmark groups
    #[command(alias = "bookmarks")]
    Groups,
    /// List branches in the current bookmark group
    Branches,
}

#[derive(Subcommand)]
enum ResetCommands {
    /// Forget all recorded checkouts
    Checkouts,
}

#[derive(clap::Args)]
struct HistoryArgs {
    /// Number of branches to show (default 10, or `default_limit` in .git/gitbm.toml)
    #[arg(short, long)]
    limit: Option<usize>,

    /// Show the least recent / least frequent branches instead
    #[arg(short, long)]
    reverse: bool,

    /// Print the list instead of opening the picker
    #[arg(long)]
    list: bool,
}

impl From<HistoryArgs> for HistoryOptions {
    fn from(args: HistoryArgs) -> Self {
        Self {
            limit: args.limit,
            reverse: args.reverse,
            list_only: args.list,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("gitbm=debug")
    } else {
        EnvFilter::try_from_env("GITBM_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let mode = if cli.json { OutputMode::Json } else { OutputMode::Human };
    output::set_quiet(cli.json);

    if let Err(err) = run(cli.command, mode) {
        match err.downcast_ref::<Error>() {
            Some(e) if e.is_cancelled() => {
                ui::info("Selection cancelled");
            }
            _ => {
                ui::error(&format!("{:#}", err));
                std::process::exit(1);
            }
        }
    }
}

fn run(command: Commands, mode: OutputMode) -> anyhow::Result<()> {
    let workspace = Workspace::from_current_dir()?;
    let git = GitCli::new(workspace.root());
    let ctx = Context::new(workspace, git, TermSelector::new(), mode);

    match command {
        Commands::Init { no_hook } => commands::run_init(&ctx, no_hook),
        Commands::Create { name } => commands::run_create(&ctx, name),
        Commands::List { what: ListCommands::Groups } => commands::run_list_groups(&ctx),
        Commands::List { what: ListCommands::Branches } => commands::run_list_branches(&ctx),
        Commands::Switch { name } => commands::run_switch(&ctx, name),
        Commands::Delete { name, group, current } => {
            let target = match (name.or(group), current) {
                (Some(name), _) => DeleteTarget::Named(name),
                (None, true) => DeleteTarget::Current,
                (None, false) => DeleteTarget::Interactive,
            };
            commands::run_delete(&ctx, target)
        }
        Commands::Add { alias, branch } => commands::run_add(&ctx, alias, branch),
        Commands::Remove { name, branch } => commands::run_remove(&ctx, name, branch),
        Commands::Checkout { name } => commands::run_checkout(&ctx, name),
        Commands::Show => commands::run_show(&ctx),
        Commands::Recent { mode: rank, history } => {
            let ranking = if rank.is_some() { Ranking::RecentFrequent } else { Ranking::Recent };
            commands::run_history(&ctx, ranking, history.into())
        }
        Commands::Frequent { history } => commands::run_history(&ctx, Ranking::Frequent, history.into()),
        Commands::Reset { what: ResetCommands::Checkouts } => commands::run_reset_checkouts(&ctx),
        Commands::Destroy { force } => commands::run_destroy(&ctx, force),
        Commands::TrackCheckout { branch, message } => {
            commands::run_track_checkout(&ctx, &branch, message.as_deref())
        }
    }
}
