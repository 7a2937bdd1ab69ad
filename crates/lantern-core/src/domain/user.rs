use crate::domain::email::EmailKey;
use crate::domain::ids::UserId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: EmailKey,
    pub display_name: Option<String>,
    pub created_at: i64,
}
