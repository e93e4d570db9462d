use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;

use crate::guard::{Owned, UserId};

/// Public news item. News has no owner; anyone may read it.
#[derive(Debug, Clone, Serialize, FromRow, PartialEq, Eq)]
pub struct News {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsDraft {
    pub title: String,
    pub text: String,
    pub date: NaiveDate,
}

/// Comment on a news item, owned by whoever wrote it.
#[derive(Debug, Clone, Serialize, FromRow, PartialEq, Eq)]
pub struct Comment {
    pub id: i64,
    pub news_id: i64,
    author_id: UserId,
    pub text: String,
    pub created: DateTime<Utc>,
}

impl Comment {
    pub fn author_id(&self) -> &UserId {
        &self.author_id
    }
}

impl Owned for Comment {
    fn owner(&self) -> &UserId {
        &self.author_id
    }
}

/// A comment together with its author's username, as shown in a thread.
#[derive(Debug, Clone, Serialize, FromRow, PartialEq, Eq)]
pub struct CommentEntry {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub comment: Comment,
    pub author_name: String,
}

impl Owned for CommentEntry {
    fn owner(&self) -> &UserId {
        self.comment.owner()
    }
}

/// Validated comment text. The news item and author are supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentDraft {
    pub text: String,
}
