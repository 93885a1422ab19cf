//! SQLite schema definitions and SQL query constants.

/// SQL statement to create the API key table.
pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS api_keys (
    user_id INTEGER NOT NULL,
    api_key TEXT NOT NULL UNIQUE
);
"#;

pub const COUNT_API_KEY: &str = r#"
SELECT COUNT(*) FROM api_keys WHERE api_key = ?1
"#;

pub const INSERT_API_KEY: &str = r#"
INSERT OR IGNORE INTO api_keys (user_id, api_key) VALUES (?1, ?2)
"#;
