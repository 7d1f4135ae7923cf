//! Database schema definitions

/// SQL to create the bookmark_group table
pub const CREATE_BOOKMARK_GROUP_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS bookmark_group (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
)
"#;

/// SQL to create the branches table
pub const CREATE_BRANCHES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS branches (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    bookmark_group_id INTEGER NOT NULL,
    name TEXT NOT NULL,
    branch_alias TEXT,
    created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
    FOREIGN KEY (bookmark_group_id) REFERENCES bookmark_group(id) ON DELETE CASCADE,
    UNIQUE(bookmark_group_id, name)
)
"#;

/// SQL to create the current_bookmark_group table
///
/// Holds at most one row (`id = 1`). Deleting the referenced group deletes
/// the row, which leaves the store with no current group.
pub const CREATE_CURRENT_BOOKMARK_GROUP_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS current_bookmark_group (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    bookmark_group_id INTEGER NOT NULL,
    FOREIGN KEY (bookmark_group_id) REFERENCES bookmark_group(id) ON DELETE CASCADE
)
"#;

/// SQL to create the branch_checkouts table
/// Global checkout history, not scoped to a bookmark group
pub const CREATE_BRANCH_CHECKOUTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS branch_checkouts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    checkout_count INTEGER NOT NULL DEFAULT 1 CHECK (checkout_count >= 1),
    last_checked_out_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
    latest_commit_msg TEXT NOT NULL
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_bookmark_name ON bookmark_group(name)",
    "CREATE INDEX IF NOT EXISTS idx_branch_name ON branches(name)",
    "CREATE INDEX IF NOT EXISTS idx_bookmark_group_id ON branches(bookmark_group_id)",
    "CREATE INDEX IF NOT EXISTS idx_checkouts_last ON branch_checkouts(last_checked_out_at)",
    "CREATE INDEX IF NOT EXISTS idx_checkouts_count ON branch_checkouts(checkout_count)",
];

/// Fixed id of the single current_bookmark_group row
pub const CURRENT_GROUP_ROW_ID: i64 = 1;

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![
        CREATE_BOOKMARK_GROUP_TABLE,
        CREATE_BRANCHES_TABLE,
        CREATE_CURRENT_BOOKMARK_GROUP_TABLE,
        CREATE_BRANCH_CHECKOUTS_TABLE,
    ];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
