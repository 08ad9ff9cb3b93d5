//! Entity table DDL. Idempotent, so it can run on every startup.

use crate::config::Backend;
use crate::error::StoreError;
use crate::pool::ConnectionManager;

const POSTGRES_DDL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS client (
        id BIGSERIAL PRIMARY KEY,
        name VARCHAR(1000) NOT NULL CHECK (char_length(name) >= 2)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS worker (
        id BIGSERIAL PRIMARY KEY,
        name VARCHAR(1000) NOT NULL CHECK (char_length(name) >= 2),
        birthday DATE NOT NULL,
        email VARCHAR(255) NOT NULL CHECK (position('@' in email) > 0),
        level VARCHAR(7) NOT NULL CHECK (level IN ('trainee', 'junior', 'middle', 'senior')),
        salary INTEGER NOT NULL CHECK (salary > 0)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS project (
        id BIGSERIAL PRIMARY KEY,
        name VARCHAR(1000) NOT NULL CHECK (char_length(name) >= 2),
        client_id BIGINT NOT NULL REFERENCES client(id),
        start_date DATE NOT NULL,
        finish_date DATE
    )
    "#,
];

const SQLITE_DDL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS client (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL CHECK (length(name) BETWEEN 2 AND 1000)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS worker (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL CHECK (length(name) BETWEEN 2 AND 1000),
        birthday TEXT NOT NULL,
        email TEXT NOT NULL CHECK (instr(email, '@') > 0),
        level TEXT NOT NULL CHECK (level IN ('trainee', 'junior', 'middle', 'senior')),
        salary INTEGER NOT NULL CHECK (salary > 0)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS project (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL CHECK (length(name) BETWEEN 2 AND 1000),
        client_id INTEGER NOT NULL REFERENCES client(id),
        start_date TEXT NOT NULL,
        finish_date TEXT
    )
    "#,
];

/// Create the `client`, `worker` and `project` tables if they do not exist.
pub async fn ensure_schema(pool: &ConnectionManager) -> Result<(), StoreError> {
    let ddl = match pool.backend() {
        Backend::Postgres => POSTGRES_DDL,
        Backend::Sqlite => SQLITE_DDL,
    };
    let mut conn = pool.get_connection().await?;
    conn.execute_batch(ddl).await?;
    tracing::info!(backend = %pool.backend(), tables = ddl.len(), "schema ensured");
    Ok(())
}
