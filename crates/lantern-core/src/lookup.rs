//! Email lookup used by the password recovery flow.

use crate::domain::{EmailKey, User};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("user store unavailable: {0}")]
    StoreUnavailable(String),
}

/// Read access to a store of users keyed by their lowercase email.
pub trait UserDirectory {
    /// Returns the single user whose key equals `key`, if any.
    fn find_unique_by_email(&self, key: &EmailKey) -> Result<Option<User>, LookupError>;
}

/// Finds the user registered under `email`, ignoring letter case.
///
/// A missing user is `Ok(None)`. Store failures propagate as
/// [`LookupError::StoreUnavailable`] without retry.
pub fn find_user_by_email<D>(directory: &D, email: &str) -> Result<Option<User>, LookupError>
where
    D: UserDirectory + ?Sized,
{
    let key = EmailKey::new(email);
    directory.find_unique_by_email(&key)
}
