use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use crate::guard::UserId;

/// Registered user.
#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(skip_serializing)]
    pub(crate) password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub(crate) fn new(username: String, password_hash: String) -> Self {
        Self {
            id: UserId::new(uuid::Uuid::new_v4().to_string()),
            username,
            password_hash,
            created_at: Utc::now(),
        }
    }
}
