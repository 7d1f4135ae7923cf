//! Persisted entities
//!
//! - [`BookmarkGroup`]: a named collection of branch bookmarks
//! - [`Branch`]: a bookmarked branch scoped to one group
//! - [`BranchCheckout`]: global checkout history row keyed by branch name

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Row id of a bookmark group.
pub type GroupId = i64;

/// Returned by the current-group pointer when no group is active.
pub const UNSET_GROUP_ID: GroupId = 0;

/// The kind of entity an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    BookmarkGroup,
    Branch,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::BookmarkGroup => "bookmark group",
            EntityKind::Branch => "branch",
        }
    }

    pub fn plural(&self) -> &'static str {
        match self {
            EntityKind::BookmarkGroup => "bookmark groups",
            EntityKind::Branch => "branches",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookmarkGroup {
    pub id: GroupId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A bookmarked branch.
///
/// `alias` is `None` only for rows written without one; new rows always carry
/// an alias, defaulting to the branch name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub id: i64,
    pub bookmark_group_id: GroupId,
    pub name: String,
    pub alias: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Branch {
    /// Label shown in pickers: `name -- alias`, or just the name when the
    /// alias is missing or identical.
    pub fn label(&self) -> String {
        match self.alias.as_deref() {
            Some(alias) if !alias.is_empty() && alias != self.name => {
                format!("{} -- {}", self.name, alias)
            }
            _ => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchCheckout {
    pub id: i64,
    pub name: String,
    pub checkout_count: i64,
    pub last_checked_out_at: DateTime<Utc>,
    pub latest_commit_msg: String,
}

impl BranchCheckout {
    pub fn label(&self) -> String {
        if self.latest_commit_msg.is_empty() {
            self.name.clone()
        } else {
            format!("{} -- {}", self.name, self.latest_commit_msg)
        }
    }

    /// Label that also shows how often the branch was checked out.
    pub fn label_with_count(&self) -> String {
        if self.latest_commit_msg.is_empty() {
            format!("{} -- {}", self.name, self.checkout_count)
        } else {
            format!("{} -- {} -- {}", self.name, self.checkout_count, self.latest_commit_msg)
        }
    }
}
