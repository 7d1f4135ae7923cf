//! Branch bookmark repository, scoped by bookmark group

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use crate::model::{Branch, EntityKind, GroupId};
use crate::{Error, Result};
use super::map_unique_violation;

pub struct BranchStore<'a> {
    conn: &'a Connection,
}

impl<'a> BranchStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Bookmark `name` in the given group. The alias defaults to the name.
    pub fn create(&self, group_id: GroupId, name: &str, alias: Option<&str>) -> Result<Branch> {
        let now = Utc::now();
        let alias = alias.unwrap_or(name);

        self.conn
            .execute(
                r#"
                INSERT INTO branches (bookmark_group_id, name, branch_alias, created_at, updated_at)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
                params![group_id, name, alias, now, now],
            )
            .map_err(|e| map_unique_violation(e, EntityKind::Branch, name))?;

        Ok(Branch {
            id: self.conn.last_insert_rowid(),
            bookmark_group_id: group_id,
            name: name.to_string(),
            alias: Some(alias.to_string()),
            created_at: now,
            updated_at: now,
        })
    }

    /// List the branches of one group, oldest bookmark first
    pub fn list_by_group(&self, group_id: GroupId) -> Result<Vec<Branch>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, bookmark_group_id, name, branch_alias, created_at, updated_at
            FROM branches WHERE bookmark_group_id = ?1 ORDER BY id
            "#,
        )?;

        let branches = stmt
            .query_map([group_id], row_to_branch)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(branches)
    }

    pub fn get_by_name(&self, group_id: GroupId, name: &str) -> Result<Branch> {
        self.conn
            .query_row(
                r#"
                SELECT id, bookmark_group_id, name, branch_alias, created_at, updated_at
                FROM branches WHERE bookmark_group_id = ?1 AND name = ?2
                "#,
                params![group_id, name],
                row_to_branch,
            )
            .optional()?
            .ok_or_else(|| Error::NotFound {
                kind: EntityKind::Branch,
                name: name.to_string(),
            })
    }

    /// Remove a branch from a group. Removing a branch that is not there is a no-op.
    pub fn remove(&self, group_id: GroupId, name: &str) -> Result<()> {
        let removed = self.conn.execute(
            "DELETE FROM branches WHERE bookmark_group_id = ?1 AND name = ?2",
            params![group_id, name],
        )?;
        tracing::debug!(branch = name, group_id, removed, "removed branch");
        Ok(())
    }
}

fn row_to_branch(row: &rusqlite::Row) -> rusqlite::Result<Branch> {
    Ok(Branch {
        id: row.get(0)?,
        bookmark_group_id: row.get(1)?,
        name: row.get(2)?,
        alias: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}
