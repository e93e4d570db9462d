mod config;
mod csrf;
mod errors;
mod lifecycle;
mod store;
mod types;

pub use config::{SESSION_COOKIE_MAX_AGE, SESSION_COOKIE_NAME, SESSION_COOKIE_SECURE};
pub use csrf::verify_csrf_token;
pub use errors::SessionError;
pub use lifecycle::{get_session_id_from_headers, load_session, prepare_logout_response};
pub use store::SessionStore;
pub use types::{CsrfToken, IssuedSession, SessionUser};

pub(crate) use lifecycle::create_session;
