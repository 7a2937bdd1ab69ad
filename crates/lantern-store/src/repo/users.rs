use crate::error::{Result, StoreError};
use lantern_core::domain::{EmailKey, User, UserId};
use lantern_core::lookup::{LookupError, UserDirectory};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::str::FromStr;

const USER_COLUMNS: &str = "id, email, display_name, created_at";

#[derive(Debug, Clone)]
pub struct UserNew {
    pub email: String,
    pub display_name: Option<String>,
}

pub struct UsersRepo<'a> {
    conn: &'a Connection,
}

impl<'a> UsersRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        self.find_by_key(&EmailKey::new(email))
    }

    pub fn find_by_key(&self, key: &EmailKey) -> Result<Option<User>> {
        let row = self
            .conn
            .query_row(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1;"),
                [key.as_str()],
                read_row,
            )
            .optional()?;
        row.map(user_from_row).transpose()
    }

    pub fn get(&self, id: &UserId) -> Result<Option<User>> {
        let row = self
            .conn
            .query_row(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1;"),
                [id.to_string()],
                read_row,
            )
            .optional()?;
        row.map(user_from_row).transpose()
    }

    pub fn create(&self, now_utc: i64, new: UserNew) -> Result<User> {
        let email = EmailKey::new(&new.email);
        let display_name = new
            .display_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());
        let user = User {
            id: UserId::new(),
            email,
            display_name,
            created_at: now_utc,
        };

        let inserted = self.conn.execute(
            "INSERT INTO users (id, email, display_name, created_at)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                user.id.to_string(),
                user.email.as_str(),
                user.display_name,
                user.created_at
            ],
        );
        match inserted {
            Ok(_) => Ok(user),
            Err(err) if is_unique_violation(&err) => {
                Err(StoreError::DuplicateEmail(user.email.into_inner()))
            }
            Err(err) => Err(err.into()),
        }
    }
}

impl UserDirectory for UsersRepo<'_> {
    fn find_unique_by_email(
        &self,
        key: &EmailKey,
    ) -> std::result::Result<Option<User>, LookupError> {
        Ok(self.find_by_key(key)?)
    }
}

struct UserRow {
    id: String,
    email: String,
    display_name: Option<String>,
    created_at: i64,
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<UserRow> {
    Ok(UserRow {
        id: row.get(0)?,
        email: row.get(1)?,
        display_name: row.get(2)?,
        created_at: row.get(3)?,
    })
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

fn user_from_row(row: UserRow) -> Result<User> {
    let id = UserId::from_str(&row.id).map_err(|_| StoreError::InvalidId(row.id.clone()))?;
    let email = EmailKey::new(&row.email);
    if email.as_str() != row.email {
        return Err(StoreError::InvalidEmailKey(row.email));
    }
    Ok(User {
        id,
        email,
        display_name: row.display_name,
        created_at: row.created_at,
    })
}
