use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a registered user, as recorded in a resource's owner column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Who is making the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    /// No session; never matches any owner.
    Anonymous,
    /// Logged-in user.
    User(UserId),
}

impl Identity {
    pub fn user_id(&self) -> Option<&UserId> {
        match self {
            Self::Anonymous => None,
            Self::User(id) => Some(id),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::User(_))
    }
}

impl From<Option<UserId>> for Identity {
    fn from(id: Option<UserId>) -> Self {
        id.map_or(Self::Anonymous, Self::User)
    }
}

/// Operation being attempted on an owned resource or collection.
///
/// All of them require an authenticated requester.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ReadDetail,
    Edit,
    Delete,
    List,
    Create,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ReadDetail => "read-detail",
            Self::Edit => "edit",
            Self::Delete => "delete",
            Self::List => "list",
            Self::Create => "create",
        };
        f.write_str(name)
    }
}

/// Outcome of an ownership check.
///
/// There is deliberately no "forbidden" variant: a mismatch is reported exactly
/// like a missing resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    DenyNotFound,
    /// `next` is the URL to come back to after logging in.
    DenyRedirectToLogin { next: String },
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// A resource with an owner fixed at creation.
pub trait Owned {
    fn owner(&self) -> &UserId;
}

/// Creation input paired with the owner taken from the requester.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamped<T> {
    owner: UserId,
    draft: T,
}

impl<T> Stamped<T> {
    pub(super) fn new(owner: UserId, draft: T) -> Self {
        Self { owner, draft }
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    pub fn draft(&self) -> &T {
        &self.draft
    }
}
