use chrono::{DateTime, Utc};
use http::HeaderMap;
use serde::Serialize;

use crate::guard::{Identity, UserId};
use crate::userdb::User;

/// The part of a user that request handlers see.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionUser {
    pub id: UserId,
    pub username: String,
}

impl From<User> for SessionUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
        }
    }
}

impl From<&SessionUser> for Identity {
    fn from(user: &SessionUser) -> Self {
        Identity::User(user.id.clone())
    }
}

/// Per-session token that state-changing requests must echo back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrfToken(String);

impl CsrfToken {
    pub(crate) fn new(token: String) -> Self {
        Self(token)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone)]
pub(crate) struct StoredSession {
    pub(crate) user_id: UserId,
    pub(crate) csrf_token: CsrfToken,
    pub(crate) expires_at: DateTime<Utc>,
}

/// A freshly created session and the headers that hand its cookie to the browser.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub session_id: String,
    pub csrf_token: CsrfToken,
    pub headers: HeaderMap,
}
