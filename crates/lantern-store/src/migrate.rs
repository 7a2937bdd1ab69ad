//! Schema versions are tracked in `PRAGMA user_version`.

use crate::error::{Result, StoreError};
use rusqlite::Connection;

const MIGRATIONS: &[&str] = &[include_str!("../migrations/001_init.sql")];

pub fn latest_version() -> i64 {
    MIGRATIONS.len() as i64
}

pub fn run_migrations(conn: &Connection) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    let current = schema_version(&tx)?;
    if current > latest_version() {
        return Err(StoreError::Migration(format!(
            "db version {} newer than available migrations {}",
            current,
            latest_version()
        )));
    }

    for (version, sql) in (1..).zip(MIGRATIONS).skip(current.max(0) as usize) {
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", version)?;
    }

    tx.commit()?;
    Ok(())
}

pub fn schema_version(conn: &Connection) -> Result<i64> {
    let version = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    Ok(version)
}
