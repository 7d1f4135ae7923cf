//! Storage Layer - SQLite-backed persistence
//!
//! One database file per repository with tables:
//! - bookmark_group(id, name, created_at, updated_at)
//! - branches(id, bookmark_group_id, name, branch_alias, created_at, updated_at)
//! - current_bookmark_group(id = 1, bookmark_group_id)
//! - branch_checkouts(id, name, checkout_count, last_checked_out_at, latest_commit_msg)

pub mod schema;
pub mod sqlite;
pub mod groups;
pub mod branches;
pub mod current;
pub mod checkouts;

pub use sqlite::Store;
pub use groups::GroupStore;
pub use branches::BranchStore;
pub use current::CurrentGroup;
pub use checkouts::{CheckoutStore, Ranking, RecentFrequentOrder};

use crate::Error;
use crate::model::EntityKind;

/// Map a unique-constraint violation to [`Error::DuplicateName`].
///
/// Any other failure is passed through as a storage error.
pub(crate) fn map_unique_violation(err: rusqlite::Error, kind: EntityKind, name: &str) -> Error {
    if let rusqlite::Error::SqliteFailure(ref failure, _) = err {
        if failure.code == rusqlite::ErrorCode::ConstraintViolation
            && failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
        {
            return Error::DuplicateName {
                kind,
                name: name.to_string(),
            };
        }
    }
    Error::Storage(err)
}
