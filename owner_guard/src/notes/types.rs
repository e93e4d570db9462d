use serde::Serialize;
use sqlx::FromRow;

use crate::guard::{Owned, UserId};

/// A private note. `author_id` is written once, when the note is created.
#[derive(Debug, Clone, Serialize, FromRow, PartialEq, Eq)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub slug: String,
    author_id: UserId,
}

impl Note {
    pub fn author_id(&self) -> &UserId {
        &self.author_id
    }
}

impl Owned for Note {
    fn owner(&self) -> &UserId {
        &self.author_id
    }
}

/// Validated note content, ready to be stored. Carries no owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub text: String,
    pub slug: String,
}
