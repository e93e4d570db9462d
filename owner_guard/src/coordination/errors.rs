//! Error type returned by every coordination function

use thiserror::Error;

use crate::news::NewsError;
use crate::notes::NoteError;
use crate::session::SessionError;
use crate::storage::StorageError;
use crate::userdb::UserError;
use crate::utils::UtilError;

/// Errors that can occur while carrying out a user-visible operation
#[derive(Error, Debug)]
pub enum CoordinationError {
    /// Requester is anonymous; send them to log in and back to `next`
    #[error("Login required to access {next}")]
    LoginRequired { next: String },

    /// Resource is missing, or belongs to someone else
    #[error("Resource not found: {resource_type} {resource_id}")]
    ResourceNotFound {
        resource_type: String,
        resource_id: String,
    },

    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Error from the user database operations
    #[error("User error: {0}")]
    UserError(UserError),

    #[error("Note error: {0}")]
    NoteError(NoteError),

    #[error("News error: {0}")]
    NewsError(NewsError),

    /// Error from Session operations
    #[error("Session error: {0}")]
    SessionError(SessionError),

    /// Error from utils operations
    #[error("Utils error: {0}")]
    UtilsError(UtilError),
}

impl CoordinationError {
    pub(crate) fn not_found(resource_type: &str, resource_id: impl ToString) -> Self {
        Self::ResourceNotFound {
            resource_type: resource_type.to_string(),
            resource_id: resource_id.to_string(),
        }
    }

    /// Log the error and return self
    ///
    /// Guard denials are expected traffic and are logged at debug level only.
    pub fn log(self) -> Self {
        match &self {
            Self::LoginRequired { next } => tracing::debug!("Login required for {}", next),
            Self::ResourceNotFound {
                resource_type,
                resource_id,
            } => tracing::debug!("Resource not found: {} {}", resource_type, resource_id),
            Self::Database(msg) => tracing::error!("Database error: {}", msg),
            Self::UserError(err) => tracing::error!("User error: {}", err),
            Self::NoteError(err) => tracing::error!("Note error: {}", err),
            Self::NewsError(err) => tracing::error!("News error: {}", err),
            Self::SessionError(err) => tracing::error!("Session error: {}", err),
            Self::UtilsError(err) => tracing::error!("Utils error: {}", err),
        }
        self
    }
}

// Custom From implementations that automatically log errors

impl From<NoteError> for CoordinationError {
    fn from(err: NoteError) -> Self {
        let error = Self::NoteError(err);
        tracing::error!("{}", error);
        error
    }
}

impl From<NewsError> for CoordinationError {
    fn from(err: NewsError) -> Self {
        let error = Self::NewsError(err);
        tracing::error!("{}", error);
        error
    }
}

impl From<SessionError> for CoordinationError {
    fn from(err: SessionError) -> Self {
        let error = Self::SessionError(err);
        tracing::error!("{}", error);
        error
    }
}

impl From<UserError> for CoordinationError {
    fn from(err: UserError) -> Self {
        let error = Self::UserError(err);
        tracing::error!("{}", error);
        error
    }
}

impl From<UtilError> for CoordinationError {
    fn from(err: UtilError) -> Self {
        let error = Self::UtilsError(err);
        tracing::error!("{}", error);
        error
    }
}

impl From<StorageError> for CoordinationError {
    fn from(err: StorageError) -> Self {
        Self::Database(err.to_string()).log()
    }
}
