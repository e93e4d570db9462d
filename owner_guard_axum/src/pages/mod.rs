//! HTML pages of the notes and news applications

mod auth;
mod news;
mod notes;

pub(crate) use auth::router as auth_router;
pub(crate) use news::router as news_routes;
pub(crate) use notes::router as notes_routes;

use askama::Template;
use axum::{
    extract::{
        Form, Path,
        rejection::{FormRejection, PathRejection},
    },
    response::{Html, IntoResponse, Response},
};
use http::{HeaderValue, StatusCode, Uri};
use serde::Deserialize;

use owner_guard::FormErrors;

use crate::config::{CSRF_HEADER, RESPOND_WITH_X_CSRF_TOKEN};
use crate::error::{IntoResponseError, ResponseError};
use crate::session::AuthUser;

/// A submitted form together with the CSRF token that came with it.
#[derive(Debug, Deserialize)]
pub(crate) struct CsrfForm<T> {
    #[serde(default)]
    csrf_token: String,
    #[serde(flatten)]
    fields: T,
}

/// Form with nothing but the CSRF token, for confirmation pages.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct NoFields {}

/// Unpack a form submission, checking the CSRF token of logged-in users.
///
/// Anonymous requests get default fields when the body is unusable, so that the
/// guard can answer them with a login redirect.
pub(crate) fn accept_form<T: Default>(
    user: Option<&AuthUser>,
    form: Result<Form<CsrfForm<T>>, FormRejection>,
) -> Result<T, ResponseError> {
    match (user, form) {
        (Some(user), Ok(Form(form))) => {
            user.verify_form_csrf(&form.csrf_token)?;
            Ok(form.fields)
        }
        (None, Ok(Form(form))) => Ok(form.fields),
        (Some(user), Err(rejection)) if user.csrf_via_header_verified => {
            tracing::debug!("No usable form body: {}", rejection);
            Ok(T::default())
        }
        (Some(_), Err(rejection)) => Err(ResponseError::Status(
            rejection.status(),
            rejection.body_text(),
        )),
        (None, Err(_)) => Ok(T::default()),
    }
}

/// Render a page, echoing the CSRF token for logged-in users when configured.
pub(crate) fn render_page<T: Template>(
    template: &T,
    user: Option<&AuthUser>,
) -> Result<Response, ResponseError> {
    let html = Html(template.render().into_response_error()?);
    let mut response = html.into_response();

    if let Some(user) = user.filter(|_| *RESPOND_WITH_X_CSRF_TOKEN) {
        let value = HeaderValue::from_str(&user.csrf_token).map_err(|e| {
            ResponseError::Status(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;
        response.headers_mut().insert(CSRF_HEADER, value);
    }
    Ok(response)
}

/// Messages for one field, ready for a template.
pub(crate) fn messages(errors: Option<&FormErrors>, field: &str) -> Vec<String> {
    errors
        .map(|errors| {
            errors
                .for_field(field)
                .into_iter()
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Numeric id from the path; anything else names a page that does not exist.
pub(crate) fn numeric_id(id: Result<Path<i64>, PathRejection>) -> Result<i64, ResponseError> {
    id.map(|Path(id)| id).map_err(|rejection| {
        tracing::debug!("Unusable id in path: {}", rejection);
        ResponseError::Status(StatusCode::NOT_FOUND, "Not Found".to_string())
    })
}

/// Path and query of the request, used as the continuation after login.
pub(crate) fn request_path(uri: &Uri) -> String {
    uri.path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string())
}

/// Username to show in the navigation bar.
pub(crate) fn viewer_name(user: Option<&AuthUser>) -> Option<String> {
    user.map(|u| u.username.clone())
}
