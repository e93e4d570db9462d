use axum::response::{IntoResponse, Redirect, Response};
use http::StatusCode;
use owner_guard::{CoordinationError, login_redirect_location};

/// What a handler answers with when it cannot serve the page.
#[derive(Debug)]
pub enum ResponseError {
    /// Send the browser to the login page, then back to `next`.
    LoginRedirect { next: String },
    Status(StatusCode, String),
}

impl ResponseError {
    pub(crate) fn forbidden(message: &str) -> Self {
        Self::Status(StatusCode::FORBIDDEN, message.to_string())
    }
}

impl IntoResponse for ResponseError {
    fn into_response(self) -> Response {
        match self {
            Self::LoginRedirect { next } => {
                let location = login_redirect_location(&next);
                tracing::debug!("Redirecting to {}", location);
                Redirect::to(&location).into_response()
            }
            Self::Status(status, message) => (status, message).into_response(),
        }
    }
}

/// Helper trait for converting errors to a standard response error format
pub(crate) trait IntoResponseError<T> {
    fn into_response_error(self) -> Result<T, ResponseError>;
}

/// Ownership denials become a login redirect or a plain 404; never a 403.
impl<T> IntoResponseError<T> for Result<T, CoordinationError> {
    fn into_response_error(self) -> Result<T, ResponseError> {
        self.map_err(|e| {
            let status = match &e {
                CoordinationError::LoginRequired { next } => {
                    return ResponseError::LoginRedirect { next: next.clone() };
                }
                CoordinationError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            let message = match status {
                StatusCode::NOT_FOUND => "Not Found".to_string(),
                _ => e.to_string(),
            };
            ResponseError::Status(status, message)
        })
    }
}

/// Template rendering failures
impl<T> IntoResponseError<T> for Result<T, askama::Error> {
    fn into_response_error(self) -> Result<T, ResponseError> {
        self.map_err(|e| {
            tracing::error!("Template render failed: {}", e);
            ResponseError::Status(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })
    }
}
