use thiserror::Error;

#[derive(Clone, Error, Debug)]
pub enum NoteError {
    #[error("Note not found")]
    NotFound,

    #[error("Slug already in use: {0}")]
    SlugConflict(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<sqlx::Error> for NoteError {
    fn from(err: sqlx::Error) -> Self {
        NoteError::Storage(err.to_string())
    }
}
