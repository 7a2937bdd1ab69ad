use crate::error::{Result, StoreError};
use std::env;
use std::fs;
use std::path::PathBuf;

const APP_DIR: &str = "lantern";
const DB_FILENAME: &str = "lantern.sqlite3";

/// Picks the database file: an explicit path wins, otherwise
/// `$XDG_DATA_HOME/lantern` or `~/.local/share/lantern`. Missing parent
/// directories are created.
pub fn resolve_db_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = custom {
        if path.as_os_str().is_empty() {
            return Err(StoreError::InvalidDataPath(path));
        }
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)?,
            _ => {}
        }
        return Ok(path);
    }

    let dir = default_data_dir()?;
    fs::create_dir_all(&dir)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&dir, fs::Permissions::from_mode(0o700))?;
    }
    Ok(dir.join(DB_FILENAME))
}

fn default_data_dir() -> Result<PathBuf> {
    match env::var_os("XDG_DATA_HOME").map(PathBuf::from) {
        Some(path) if path.as_os_str().is_empty() => Err(StoreError::InvalidDataPath(path)),
        Some(path) => Ok(path.join(APP_DIR)),
        None => {
            let home = dirs::home_dir().ok_or(StoreError::MissingHomeDir)?;
            Ok(home.join(".local").join("share").join(APP_DIR))
        }
    }
}
