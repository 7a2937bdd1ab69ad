use lantern_core::LookupError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("sqlite error: {0}")]
    Sql(#[from] rusqlite::Error),
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid id string: {0}")]
    InvalidId(String),
    #[error("migration error: {0}")]
    Migration(String),
    #[error("invalid data path: {0}")]
    InvalidDataPath(PathBuf),
    #[error("duplicate email: {0}")]
    DuplicateEmail(String),
    #[error("stored email is not a lookup key: {0}")]
    InvalidEmailKey(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    Io,
    Sql,
    MissingHomeDir,
    InvalidId,
    Migration,
    InvalidDataPath,
    DuplicateEmail,
    InvalidEmailKey,
}

impl StoreError {
    pub fn kind(&self) -> StoreErrorKind {
        match self {
            StoreError::Io(_) => StoreErrorKind::Io,
            StoreError::Sql(_) => StoreErrorKind::Sql,
            StoreError::MissingHomeDir => StoreErrorKind::MissingHomeDir,
            StoreError::InvalidId(_) => StoreErrorKind::InvalidId,
            StoreError::Migration(_) => StoreErrorKind::Migration,
            StoreError::InvalidDataPath(_) => StoreErrorKind::InvalidDataPath,
            StoreError::DuplicateEmail(_) => StoreErrorKind::DuplicateEmail,
            StoreError::InvalidEmailKey(_) => StoreErrorKind::InvalidEmailKey,
        }
    }
}

// A lookup only reads, so any store failure means the record could not be
// fetched. Corrupt rows count as well.
impl From<StoreError> for LookupError {
    fn from(err: StoreError) -> Self {
        LookupError::StoreUnavailable(err.to_string())
    }
}
