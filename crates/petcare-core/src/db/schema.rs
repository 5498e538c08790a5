//! SQLite schema definition.

/// Key-value store holding one serialized collection per key.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS kv_store (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,                         -- JSON array of records
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;
