//! SQLite storage implementation

use std::path::Path;
use std::time::Duration;
use rusqlite::{Connection, OpenFlags};
use crate::{Result, Error};
use super::{schema, BranchStore, CheckoutStore, CurrentGroup, GroupStore, RecentFrequentOrder};

/// SQLite-backed store for one repository.
///
/// A `Store` owns a single connection and lives for one command invocation.
/// Foreign keys are enforced on every connection it opens.
pub struct Store {
    conn: Connection,
    recent_frequent_order: RecentFrequentOrder,
}

impl Store {
    /// Create the database file (if needed) and its schema.
    ///
    /// Safe to call on an already initialized file. When the file did not
    /// exist before and the schema cannot be created, the file is removed
    /// again so no half-initialized store is left behind.
    pub fn initialize(path: &Path) -> Result<()> {
        Self::initialize_with(path, &schema::all_schema_statements())
    }

    pub(crate) fn initialize_with(path: &Path, statements: &[&str]) -> Result<()> {
        let existed = path.exists();
        let result = Connection::open(path)
            .map_err(Error::from)
            .and_then(|conn| {
                let store = Self::from_connection(conn, Duration::ZERO)?;
                store.run_statements(statements)
            });

        if let Err(ref e) = result {
            if !existed && path.exists() {
                tracing::warn!("schema creation failed ({}), removing {}", e, path.display());
                if let Err(rm) = std::fs::remove_file(path) {
                    tracing::warn!("could not remove {}: {}", path.display(), rm);
                }
            }
        }
        result
    }

    /// Open an existing, initialized database file.
    pub fn open(path: &Path) -> Result<Self> {
        Self::open_with_busy_timeout(path, Duration::ZERO)
    }

    /// Open an existing database file, waiting at most `busy_timeout` for a
    /// lock held by another process. A zero timeout fails immediately.
    pub fn open_with_busy_timeout(path: &Path, busy_timeout: Duration) -> Result<Self> {
        if !path.exists() {
            return Err(Error::StoreNotInitialized(path.to_path_buf()));
        }
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(path, flags)?;
        tracing::debug!("opened store at {}", path.display());
        Self::from_connection(conn, busy_timeout)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self::from_connection(conn, Duration::ZERO)?;
        store.run_statements(&schema::all_schema_statements())?;
        Ok(store)
    }

    fn from_connection(conn: Connection, busy_timeout: Duration) -> Result<Self> {
        // SQLite leaves foreign keys off unless asked, per connection
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.busy_timeout(busy_timeout)?;
        Ok(Self {
            conn,
            recent_frequent_order: RecentFrequentOrder::default(),
        })
    }

    fn run_statements(&self, statements: &[&str]) -> Result<()> {
        for stmt in statements {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }

    /// Choose how the recent-frequent ranking breaks ties.
    pub fn with_recent_frequent_order(mut self, order: RecentFrequentOrder) -> Self {
        self.recent_frequent_order = order;
        self
    }

    // ========== Repositories ==========

    pub fn groups(&self) -> GroupStore<'_> {
        GroupStore::new(&self.conn)
    }

    pub fn branches(&self) -> BranchStore<'_> {
        BranchStore::new(&self.conn)
    }

    pub fn current(&self) -> CurrentGroup<'_> {
        CurrentGroup::new(&self.conn)
    }

    pub fn checkouts(&self) -> CheckoutStore<'_> {
        CheckoutStore::new(&self.conn, self.recent_frequent_order)
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<DbStats> {
        let count = |table: &str| -> Result<usize> {
            let sql = format!("SELECT COUNT(*) FROM {}", table);
            let n: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
            Ok(n as usize)
        };
        Ok(DbStats {
            groups: count("bookmark_group")?,
            branches: count("branches")?,
            checkouts: count("branch_checkouts")?,
        })
    }
}

/// Database statistics
#[derive(Debug, Clone, serde::Serialize)]
pub struct DbStats {
    pub groups: usize,
    pub branches: usize,
    pub checkouts: usize,
}

impl std::fmt::Display for DbStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Database Statistics:")?;
        writeln!(f, "  Bookmark groups: {}", self.groups)?;
        writeln!(f, "  Branches: {}", self.branches)?;
        writeln!(f, "  Tracked checkouts: {}", self.checkouts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UNSET_GROUP_ID;

    #[test]
    fn test_initialize_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gitbm.db");

        Store::initialize(&path).unwrap();
        {
            let store = Store::open(&path).unwrap();
            store.groups().create("alpha").unwrap();
        }
        Store::initialize(&path).unwrap();

        let store = Store::open(&path).unwrap();
        let groups = store.groups().list().unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "alpha");
    }

    #[test]
    fn test_open_missing_file_is_not_initialized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gitbm.db");

        let err = Store::open(&path).err().unwrap();
        assert!(matches!(err, Error::StoreNotInitialized(_)));
        assert!(!path.exists());
    }

    #[test]
    fn test_failed_initialize_removes_new_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gitbm.db");

        // The first statement writes the file, the second fails
        let statements = [schema::CREATE_BOOKMARK_GROUP_TABLE, "CREATE TABLE broken ("];
        let err = Store::initialize_with(&path, &statements).err().unwrap();
        assert!(matches!(err, Error::Storage(_)));
        assert!(!path.exists());

        // A good run afterwards starts from scratch
        Store::initialize(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_failed_initialize_keeps_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gitbm.db");
        Store::initialize(&path).unwrap();
        {
            let store = Store::open(&path).unwrap();
            store.groups().create("alpha").unwrap();
        }

        assert!(Store::initialize_with(&path, &["CREATE TABLE broken ("]).is_err());
        let store = Store::open(&path).unwrap();
        assert_eq!(store.groups().list().unwrap().len(), 1);
    }

    #[test]
    fn test_locked_database_fails_without_waiting() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gitbm.db");
        Store::initialize(&path).unwrap();

        let holder = Connection::open(&path).unwrap();
        holder.execute_batch("BEGIN IMMEDIATE;").unwrap();

        let store = Store::open(&path).unwrap();
        let started = std::time::Instant::now();
        let err = store.checkouts().upsert("main", "init").err().unwrap();
        assert!(started.elapsed() < Duration::from_secs(5));
        match err {
            Error::Storage(rusqlite::Error::SqliteFailure(e, _)) => {
                assert_eq!(e.code, rusqlite::ErrorCode::DatabaseBusy);
            }
            other => panic!("expected a busy error, got {other:?}"),
        }

        holder.execute_batch("ROLLBACK;").unwrap();
        store.checkouts().upsert("main", "init").unwrap();
        assert_eq!(store.checkouts().count().unwrap(), 1);
    }

    #[test]
    fn test_foreign_keys_enforced_on_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gitbm.db");
        Store::initialize(&path).unwrap();

        let store = Store::open(&path).unwrap();
        let err = store.branches().create(42, "feature/x", None).err().unwrap();
        assert!(matches!(err, Error::Storage(_)));
        assert_eq!(store.current().get_id().unwrap(), UNSET_GROUP_ID);
    }

    #[test]
    fn test_stats() {
        let store = Store::open_in_memory().unwrap();
        let id = store.groups().create("alpha").unwrap();
        store.branches().create(id, "main", None).unwrap();
        store.checkouts().upsert("main", "init").unwrap();

        let stats = store.stats().unwrap();
        assert_eq!(stats.groups, 1);
        assert_eq!(stats.branches, 1);
        assert_eq!(stats.checkouts, 1);
    }

    #[test]
    fn test_end_to_end_bookmark_flow() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gitbm.db");
        Store::initialize(&path).unwrap();
        let store = Store::open(&path).unwrap();

        store.groups().create("alpha").unwrap();
        let current = store.current().get_id().unwrap();
        assert_eq!(store.groups().get_current().unwrap().unwrap().name, "alpha");

        store.branches().create(current, "feature/x", Some("FX")).unwrap();
        let branches = store.branches().list_by_group(current).unwrap();
        assert_eq!(branches.len(), 1);
        assert_eq!(branches[0].name, "feature/x");
        assert_eq!(branches[0].alias.as_deref(), Some("FX"));

        store.branches().remove(current, "feature/x").unwrap();
        assert!(store.branches().list_by_group(current).unwrap().is_empty());
    }
}
