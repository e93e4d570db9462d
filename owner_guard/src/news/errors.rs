use thiserror::Error;

#[derive(Clone, Error, Debug)]
pub enum NewsError {
    #[error("News item not found")]
    NewsNotFound,

    #[error("Comment not found")]
    CommentNotFound,

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<sqlx::Error> for NewsError {
    fn from(err: sqlx::Error) -> Self {
        NewsError::Storage(err.to_string())
    }
}
