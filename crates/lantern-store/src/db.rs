use crate::error::Result;
use lantern_core::EmailKey;
use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;
use std::path::Path;

/// Milliseconds a query waits on a locked database before failing.
pub const BUSY_TIMEOUT_MS: i64 = 2000;

/// SQL name of the email normalizer used by the `users` schema.
pub const EMAIL_KEY_FN: &str = "email_key";

pub fn open(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if path.exists() {
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
        }
    }
    prepare(&conn)?;
    Ok(conn)
}

pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    prepare(&conn)?;
    Ok(conn)
}

fn prepare(conn: &Connection) -> Result<()> {
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    conn.pragma_update(None, "busy_timeout", BUSY_TIMEOUT_MS)?;
    register_email_key(conn)
}

// The users CHECK constraint calls this, so every connection that writes
// users must register it. It folds case exactly like `EmailKey::new`.
fn register_email_key(conn: &Connection) -> Result<()> {
    conn.create_scalar_function(
        EMAIL_KEY_FN,
        1,
        FunctionFlags::SQLITE_UTF8
            | FunctionFlags::SQLITE_DETERMINISTIC
            | FunctionFlags::SQLITE_INNOCUOUS,
        |ctx| {
            let raw: Option<String> = ctx.get(0)?;
            Ok(raw.map(|raw| EmailKey::new(&raw).into_inner()))
        },
    )?;
    Ok(())
}
