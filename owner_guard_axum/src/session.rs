use axum::{
    RequestPartsExt,
    extract::{FromRef, OptionalFromRequestParts},
};
use axum_extra::{TypedHeader, headers};
use http::{Method, StatusCode, request::Parts};
use subtle::ConstantTimeEq;

use owner_guard::{Identity, SESSION_COOKIE_NAME, SessionUser, UserId, load_session};

use crate::config::CSRF_HEADER;
use crate::error::ResponseError;
use crate::state::AppState;

/// Logged-in user, available as an Axum extractor
///
/// Extracting it looks up the session named by the session cookie. For
/// state-changing methods (POST, PUT, DELETE, PATCH) the session's CSRF token
/// must also be presented, either in the `X-CSRF-Token` header or, for form
/// submissions, in the `csrf_token` form field which the handler checks with
/// [`AuthUser::verify_form_csrf`].
///
/// Handlers take it as `Option<AuthUser>`: anonymous visitors yield `None` and
/// the ownership guard decides whether they are sent to the login page.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: UserId,
    pub username: String,
    /// CSRF token associated with the user's session
    pub csrf_token: String,
    /// Whether CSRF token was verified via header
    pub csrf_via_header_verified: bool,
}

impl From<SessionUser> for AuthUser {
    fn from(session_user: SessionUser) -> Self {
        AuthUser {
            id: session_user.id,
            username: session_user.username,
            csrf_token: String::new(),
            csrf_via_header_verified: false,
        }
    }
}

impl AuthUser {
    pub fn identity(&self) -> Identity {
        Identity::User(self.id.clone())
    }

    /// Check the token submitted in a form body, unless the header already passed.
    pub fn verify_form_csrf(&self, submitted: &str) -> Result<(), ResponseError> {
        if self.csrf_via_header_verified {
            return Ok(());
        }
        if submitted.as_bytes().ct_eq(self.csrf_token.as_bytes()).into() {
            tracing::trace!("CSRF token via form field verified.");
            Ok(())
        } else {
            tracing::warn!("CSRF token mismatch (form field)");
            Err(ResponseError::forbidden("CSRF token mismatch"))
        }
    }
}

/// Identity of an optional user; `None` is anonymous.
pub(crate) fn identity_of(user: Option<&AuthUser>) -> Identity {
    user.map_or(Identity::Anonymous, AuthUser::identity)
}

fn is_state_changing(method: &Method) -> bool {
    method == Method::POST
        || method == Method::PUT
        || method == Method::DELETE
        || method == Method::PATCH
}

/// Session lookup shared by both extractor flavours.
///
/// `Ok(None)` means anonymous. A known session with a bad CSRF token is an error.
async fn resolve(parts: &mut Parts, state: &AppState) -> Result<Option<AuthUser>, ResponseError> {
    let method = parts.method.clone();
    let Ok(TypedHeader(cookies)) = parts.extract::<TypedHeader<headers::Cookie>>().await else {
        tracing::trace!("No cookies in request");
        return Ok(None);
    };

    let Some(session_id) = cookies.get(SESSION_COOKIE_NAME.as_str()) else {
        tracing::trace!("No session cookie");
        return Ok(None);
    };

    let loaded = load_session(&state.data, &state.sessions, session_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load session: {}", e);
            ResponseError::Status(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;
    let Some((session_user, session_csrf_token)) = loaded else {
        return Ok(None);
    };

    let mut auth_user = AuthUser::from(session_user);
    auth_user.csrf_token = session_csrf_token.as_str().to_string();

    if !is_state_changing(&method) {
        return Ok(Some(auth_user));
    }

    if let Some(header_csrf_token) = parts
        .headers
        .get(CSRF_HEADER)
        .and_then(|h| h.to_str().ok())
    {
        if header_csrf_token
            .as_bytes()
            .ct_eq(session_csrf_token.as_str().as_bytes())
            .into()
        {
            auth_user.csrf_via_header_verified = true;
            tracing::trace!("CSRF token via X-CSRF-Token header verified.");
        } else {
            tracing::warn!("CSRF token mismatch (X-CSRF-Token)");
            return Err(ResponseError::forbidden("CSRF token mismatch"));
        }
    } else {
        let content_type_header = parts
            .headers
            .get(http::header::CONTENT_TYPE)
            .and_then(|h| h.to_str().ok());

        let is_form_like = content_type_header.is_some_and(|ct| {
            ct.starts_with("application/x-www-form-urlencoded")
                || ct.starts_with("multipart/form-data")
        });

        if is_form_like {
            tracing::trace!("X-CSRF-Token header not found; form field will be checked");
        } else {
            tracing::warn!(
                "CSRF protection: X-CSRF-Token header missing for state-changing request with non-form Content-Type ('{:?}'). Rejecting.",
                content_type_header
            );
            return Err(ResponseError::forbidden("CSRF token missing"));
        }
    }

    Ok(Some(auth_user))
}

impl<S> OptionalFromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ResponseError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        let state = AppState::from_ref(state);
        resolve(parts, &state).await
    }
}
