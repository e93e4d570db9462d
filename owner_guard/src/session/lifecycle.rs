use chrono::{DateTime, Duration, Utc};
use http::header::{COOKIE, HeaderMap};

use crate::guard::UserId;
use crate::storage::DataStore;
use crate::userdb::UserStore;
use crate::utils::{gen_random_string, header_set_cookie};

use super::config::{SESSION_COOKIE_MAX_AGE, SESSION_COOKIE_NAME, SESSION_COOKIE_SECURE};
use super::errors::SessionError;
use super::store::SessionStore;
use super::types::{CsrfToken, IssuedSession, SessionUser, StoredSession};

pub(crate) async fn create_session(
    sessions: &SessionStore,
    user_id: &UserId,
) -> Result<IssuedSession, SessionError> {
    let session_id = gen_random_string(32)?;
    let csrf_token = CsrfToken::new(gen_random_string(32)?);
    let max_age = *SESSION_COOKIE_MAX_AGE;
    let expires_at = session_expiry(Utc::now(), max_age)?;

    sessions
        .put(
            &session_id,
            StoredSession {
                user_id: user_id.clone(),
                csrf_token: csrf_token.clone(),
                expires_at,
            },
        )
        .await;

    let mut headers = HeaderMap::new();
    header_set_cookie(
        &mut headers,
        SESSION_COOKIE_NAME.as_str(),
        &session_id,
        max_age as i64,
        *SESSION_COOKIE_SECURE,
    )?;

    tracing::debug!(%user_id, "Created session");
    Ok(IssuedSession {
        session_id,
        csrf_token,
        headers,
    })
}

/// `now + max_age`, or an error when that is not a representable time.
fn session_expiry(now: DateTime<Utc>, max_age: u64) -> Result<DateTime<Utc>, SessionError> {
    i64::try_from(max_age)
        .ok()
        .and_then(Duration::try_seconds)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .ok_or_else(|| SessionError::Expiry(format!("max age of {max_age} seconds")))
}

/// Drop the session named by the request's cookie and expire the cookie.
pub async fn prepare_logout_response(
    sessions: &SessionStore,
    request_headers: &HeaderMap,
) -> Result<HeaderMap, SessionError> {
    if let Some(session_id) = get_session_id_from_headers(request_headers)? {
        sessions.remove(session_id).await;
        tracing::debug!("Session removed");
    }

    let mut headers = HeaderMap::new();
    header_set_cookie(
        &mut headers,
        SESSION_COOKIE_NAME.as_str(),
        "",
        0,
        *SESSION_COOKIE_SECURE,
    )?;
    Ok(headers)
}

/// Resolve a session id to its user and CSRF token.
///
/// Unknown or expired sessions, and sessions whose user no longer exists, yield
/// `None`. Expired entries are purged on the way.
pub async fn load_session(
    data: &DataStore,
    sessions: &SessionStore,
    session_id: &str,
) -> Result<Option<(SessionUser, CsrfToken)>, SessionError> {
    let Some(stored) = sessions.get(session_id).await else {
        tracing::debug!("No stored session for cookie");
        return Ok(None);
    };

    if stored.expires_at < Utc::now() {
        tracing::debug!(expired_at = %stored.expires_at, "Session expired");
        sessions.remove(session_id).await;
        return Ok(None);
    }

    let Some(user) = UserStore::get_user(data, &stored.user_id).await? else {
        tracing::warn!(user_id = %stored.user_id, "Session refers to a missing user");
        sessions.remove(session_id).await;
        return Ok(None);
    };

    Ok(Some((SessionUser::from(user), stored.csrf_token)))
}

pub fn get_session_id_from_headers(headers: &HeaderMap) -> Result<Option<&str>, SessionError> {
    let Some(cookie_header) = headers.get(COOKIE) else {
        tracing::trace!("No cookie header found");
        return Ok(None);
    };

    let cookie_str = cookie_header.to_str().map_err(|e| {
        tracing::error!("Invalid cookie header: {}", e);
        SessionError::HeaderError("Invalid cookie header".to_string())
    })?;

    let cookie_name = SESSION_COOKIE_NAME.as_str();

    let session_id = cookie_str.split(';').map(|s| s.trim()).find_map(|s| {
        let mut parts = s.splitn(2, '=');
        match (parts.next(), parts.next()) {
            (Some(k), Some(v)) if k == cookie_name && !v.is_empty() => Some(v),
            _ => None,
        }
    });

    Ok(session_id)
}
