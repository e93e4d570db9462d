use http::HeaderMap;

use crate::config::LOGIN_REDIRECT_URL;
use crate::form::{FormErrors, FormOutcome, NON_FIELD_ERRORS};
use crate::guard::UserId;
use crate::session::{
    IssuedSession, SessionStore, SessionUser, create_session, prepare_logout_response,
};
use crate::storage::DataStore;
use crate::userdb::{
    INVALID_LOGIN, LoginForm, SignupForm, USERNAME_TAKEN, User, UserError, UserStore,
    hash_password, verify_password,
};

use super::errors::CoordinationError;

/// A successful login: the new session and where to send the browser.
#[derive(Debug, Clone)]
pub struct LoggedIn {
    pub user: SessionUser,
    pub session: IssuedSession,
    pub redirect_to: String,
}

/// Register a new user from the signup form.
#[tracing::instrument(skip(data, form), fields(username = %form.username))]
pub async fn signup(
    data: &DataStore,
    form: &SignupForm,
) -> Result<FormOutcome<User>, CoordinationError> {
    let (username, password) = match form.clean() {
        Ok(cleaned) => cleaned,
        Err(errors) => return Ok(FormOutcome::Invalid(errors)),
    };

    match create_user(data, &username, &password).await {
        Ok(user) => Ok(FormOutcome::Valid(user)),
        Err(CoordinationError::UserError(UserError::UsernameTaken(_))) => {
            let mut errors = FormErrors::new();
            errors.add("username", USERNAME_TAKEN);
            Ok(FormOutcome::Invalid(errors))
        }
        Err(e) => Err(e),
    }
}

/// Check credentials and open a session.
///
/// `next` is honoured only when it is a path on this site.
#[tracing::instrument(skip(data, sessions, form), fields(username = %form.username))]
pub async fn login(
    data: &DataStore,
    sessions: &SessionStore,
    form: &LoginForm,
    next: Option<&str>,
) -> Result<FormOutcome<LoggedIn>, CoordinationError> {
    let (username, password) = match form.clean() {
        Ok(cleaned) => cleaned,
        Err(errors) => return Ok(FormOutcome::Invalid(errors)),
    };

    let user = match UserStore::get_user_by_username(data, username).await? {
        Some(user) if verify_password(password, &user.password_hash) => user,
        _ => {
            tracing::debug!("Invalid credentials");
            let mut errors = FormErrors::new();
            errors.add(NON_FIELD_ERRORS, INVALID_LOGIN);
            return Ok(FormOutcome::Invalid(errors));
        }
    };

    let session = create_session(sessions, &user.id).await?;
    tracing::info!(user_id = %user.id, "User logged in");

    Ok(FormOutcome::Valid(LoggedIn {
        user: SessionUser::from(user),
        session,
        redirect_to: safe_redirect_target(next),
    }))
}

/// End the session named by the request cookie. Returns the headers that clear it.
pub async fn logout(
    sessions: &SessionStore,
    request_headers: &HeaderMap,
) -> Result<HeaderMap, CoordinationError> {
    Ok(prepare_logout_response(sessions, request_headers).await?)
}

/// Open a session for a known user without checking a password.
pub async fn force_login(
    sessions: &SessionStore,
    user_id: &UserId,
) -> Result<IssuedSession, CoordinationError> {
    Ok(create_session(sessions, user_id).await?)
}

/// Store a new user with a hashed password.
pub async fn create_user(
    data: &DataStore,
    username: &str,
    password: &str,
) -> Result<User, CoordinationError> {
    let password_hash = hash_password(password)?;
    Ok(UserStore::insert_user(data, User::new(username.to_string(), password_hash)).await?)
}

/// `next` if it is a local path, otherwise the default landing page.
fn safe_redirect_target(next: Option<&str>) -> String {
    match next {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.contains('\\')
                && !path.chars().any(char::is_control) =>
        {
            path.to_string()
        }
        _ => LOGIN_REDIRECT_URL.to_string(),
    }
}
