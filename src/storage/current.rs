//! Current bookmark group pointer
//!
//! A single persisted row; read fresh on every call, never cached.

use rusqlite::{params, Connection, OptionalExtension};
use crate::model::{GroupId, UNSET_GROUP_ID};
use crate::Result;
use super::schema::CURRENT_GROUP_ROW_ID;

pub struct CurrentGroup<'a> {
    conn: &'a Connection,
}

impl<'a> CurrentGroup<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Id of the current group, or [`UNSET_GROUP_ID`] when none is set.
    pub fn get_id(&self) -> Result<GroupId> {
        let id: Option<GroupId> = self
            .conn
            .query_row(
                "SELECT bookmark_group_id FROM current_bookmark_group WHERE id = ?1",
                [CURRENT_GROUP_ROW_ID],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id.unwrap_or(UNSET_GROUP_ID))
    }

    /// Point at `group_id`, creating the row if needed.
    pub fn set_id(&self, group_id: GroupId) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO current_bookmark_group (id, bookmark_group_id) VALUES (?1, ?2)
            ON CONFLICT(id) DO UPDATE SET bookmark_group_id = excluded.bookmark_group_id
            "#,
            params![CURRENT_GROUP_ROW_ID, group_id],
        )?;
        tracing::debug!(group_id, "switched current bookmark group");
        Ok(())
    }
}
