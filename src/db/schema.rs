//! SQL DDL for the dashboard store.

/// SQLite schema with:
/// - `users.username` UNIQUE, which `create_user` relies on to reject duplicates
/// - `annotations.row` / `annotations.column` quoted since both are SQL keywords
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL,
    role TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS annotations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    file TEXT NOT NULL,
    sheet TEXT NOT NULL,
    "row" INTEGER NOT NULL,
    "column" TEXT NOT NULL,
    annotation TEXT NOT NULL,
    status TEXT NOT NULL,
    section TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_annotations_section ON annotations(section);
"#;

/// Accounts inserted at startup; existing usernames are left untouched.
pub const SEED_USERS: [(&str, &str, &str); 2] = [
    ("admin", "admin123", "admin"),
    ("usuario", "usuario123", "user"),
];
