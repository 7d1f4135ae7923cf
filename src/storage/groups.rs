//! Bookmark group repository

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use crate::model::{BookmarkGroup, EntityKind, GroupId};
use crate::{Error, Result};
use super::{map_unique_violation, schema::CURRENT_GROUP_ROW_ID};

pub struct GroupStore<'a> {
    conn: &'a Connection,
}

impl<'a> GroupStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Create a bookmark group.
    ///
    /// The first group ever created also becomes the current group. Both
    /// writes happen in one transaction.
    pub fn create(&self, name: &str) -> Result<GroupId> {
        let tx = self.conn.unchecked_transaction()?;
        let now = Utc::now();

        tx.execute(
            "INSERT INTO bookmark_group (name, created_at, updated_at) VALUES (?1, ?2, ?3)",
            params![name, now, now],
        )
        .map_err(|e| map_unique_violation(e, EntityKind::BookmarkGroup, name))?;
        let id = tx.last_insert_rowid();

        let activated = tx.execute(
            "INSERT OR IGNORE INTO current_bookmark_group (id, bookmark_group_id) VALUES (?1, ?2)",
            params![CURRENT_GROUP_ROW_ID, id],
        )?;

        tx.commit()?;
        tracing::debug!(group = name, id, activated = activated > 0, "created bookmark group");
        Ok(id)
    }

    /// List all bookmark groups in creation order
    pub fn list(&self) -> Result<Vec<BookmarkGroup>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, created_at, updated_at FROM bookmark_group ORDER BY id"
        )?;

        let groups = stmt
            .query_map([], row_to_group)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(groups)
    }

    pub fn get_by_name(&self, name: &str) -> Result<BookmarkGroup> {
        self.conn
            .query_row(
                "SELECT id, name, created_at, updated_at FROM bookmark_group WHERE name = ?1",
                [name],
                row_to_group,
            )
            .optional()?
            .ok_or_else(|| Error::NotFound {
                kind: EntityKind::BookmarkGroup,
                name: name.to_string(),
            })
    }

    /// Get the current bookmark group, `None` when no group is active
    pub fn get_current(&self) -> Result<Option<BookmarkGroup>> {
        self.conn
            .query_row(
                r#"
                SELECT bg.id, bg.name, bg.created_at, bg.updated_at
                FROM bookmark_group bg
                JOIN current_bookmark_group cbg ON bg.id = cbg.bookmark_group_id
                WHERE cbg.id = ?1
                "#,
                [CURRENT_GROUP_ROW_ID],
                row_to_group,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Delete a bookmark group by name.
    ///
    /// Its branches go with it, and so does the current-group pointer if it
    /// referenced this group.
    pub fn delete(&self, name: &str) -> Result<()> {
        let deleted = self
            .conn
            .execute("DELETE FROM bookmark_group WHERE name = ?1", [name])?;
        if deleted == 0 {
            return Err(Error::NotFound {
                kind: EntityKind::BookmarkGroup,
                name: name.to_string(),
            });
        }
        tracing::debug!(group = name, "deleted bookmark group");
        Ok(())
    }
}

fn row_to_group(row: &rusqlite::Row) -> rusqlite::Result<BookmarkGroup> {
    Ok(BookmarkGroup {
        id: row.get(0)?,
        name: row.get(1)?,
        created_at: row.get(2)?,
        updated_at: row.get(3)?,
    })
}

#[cfg(test)]
mod tests {
    use crate::storage::Store;
    use crate::model::UNSET_GROUP_ID;
    use crate::Error;

    #[test]
    fn test_duplicate_group_name() {
        let store = Store::open_in_memory().unwrap();
        let id = store.groups().create("alpha").unwrap();
        store.branches().create(id, "main", None).unwrap();

        let err = store.groups().create("alpha").err().unwrap();
        assert!(matches!(err, Error::DuplicateName { ref name, .. } if name == "alpha"));

        let groups = store.groups().list().unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].id, id);
        assert_eq!(store.branches().list_by_group(id).unwrap().len(), 1);
        assert_eq!(store.current().get_id().unwrap(), id);
    }

    #[test]
    fn test_first_group_becomes_current() {
        let store = Store::open_in_memory().unwrap();
        assert!(store.groups().get_current().unwrap().is_none());

        let alpha = store.groups().create("alpha").unwrap();
        let beta = store.groups().create("beta").unwrap();
        assert_ne!(alpha, beta);

        let current = store.groups().get_current().unwrap().unwrap();
        assert_eq!(current.id, alpha);
        assert_eq!(current.name, "alpha");
    }

    #[test]
    fn test_list_in_creation_order() {
        let store = Store::open_in_memory().unwrap();
        for name in ["zeta", "alpha", "mid"] {
            store.groups().create(name).unwrap();
        }

        let names: Vec<String> = store.groups().list().unwrap().into_iter().map(|g| g.name).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_get_by_name() {
        let store = Store::open_in_memory().unwrap();
        let id = store.groups().create("alpha").unwrap();

        assert_eq!(store.groups().get_by_name("alpha").unwrap().id, id);
        let err = store.groups().get_by_name("nope").err().unwrap();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn test_delete_cascades_branches() {
        let store = Store::open_in_memory().unwrap();
        let alpha = store.groups().create("alpha").unwrap();
        let beta = store.groups().create("beta").unwrap();

        store.branches().create(alpha, "feature/a", None).unwrap();
        store.branches().create(alpha, "main", None).unwrap();
        store.branches().create(beta, "main", None).unwrap();

        store.groups().delete("alpha").unwrap();

        assert!(store.branches().list_by_group(alpha).unwrap().is_empty());
        let remaining = store.branches().list_by_group(beta).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].name, "main");
    }

    #[test]
    fn test_delete_current_group_clears_pointer() {
        let store = Store::open_in_memory().unwrap();
        store.groups().create("alpha").unwrap();
        let beta = store.groups().create("beta").unwrap();

        store.groups().delete("alpha").unwrap();
        assert!(store.groups().get_current().unwrap().is_none());
        assert_eq!(store.current().get_id().unwrap(), UNSET_GROUP_ID);

        store.current().set_id(beta).unwrap();
        store.groups().create("gamma").unwrap();
        assert_eq!(store.groups().get_current().unwrap().unwrap().name, "beta");
    }

    #[test]
    fn test_delete_inactive_group_keeps_pointer() {
        let store = Store::open_in_memory().unwrap();
        let alpha = store.groups().create("alpha").unwrap();
        store.groups().create("beta").unwrap();

        store.groups().delete("beta").unwrap();
        assert_eq!(store.current().get_id().unwrap(), alpha);
    }

    #[test]
    fn test_delete_missing_group() {
        let store = Store::open_in_memory().unwrap();
        let err = store.groups().delete("ghost").err().unwrap();
        assert!(matches!(err, Error::NotFound { .. }));
    }
}
