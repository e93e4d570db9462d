use askama::Template;
use axum::{
    Router,
    extract::{Form, Query, State},
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use http::HeaderMap;
use serde::Deserialize;

use owner_guard::{
    FormErrors, FormOutcome, LOGIN_URL, LoginForm, NON_FIELD_ERRORS, SignupForm, login, logout,
    signup,
};

use super::{messages, render_page};
use crate::error::{IntoResponseError, ResponseError};
use crate::state::AppState;

/// Login, logout and signup, mounted under `/auth`.
pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/login/", get(login_form).post(login_submit))
        .route("/logout/", get(logout_page).post(logout_page))
        .route("/signup/", get(signup_form).post(signup_submit))
}

#[derive(Debug, Default, Deserialize)]
struct NextQuery {
    next: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LoginInput {
    #[serde(default)]
    next: String,
    #[serde(flatten)]
    form: LoginForm,
}

#[derive(Template)]
#[template(path = "auth/login.html")]
struct LoginTemplate {
    viewer: Option<String>,
    next: String,
    username: String,
    non_field_errors: Vec<String>,
    username_errors: Vec<String>,
    password_errors: Vec<String>,
}

impl LoginTemplate {
    fn new(next: String, username: String, errors: Option<&FormErrors>) -> Self {
        Self {
            viewer: None,
            next,
            username,
            non_field_errors: messages(errors, NON_FIELD_ERRORS),
            username_errors: messages(errors, "username"),
            password_errors: messages(errors, "password"),
        }
    }
}

#[derive(Template)]
#[template(path = "auth/signup.html")]
struct SignupTemplate {
    viewer: Option<String>,
    username: String,
    username_errors: Vec<String>,
    password1_errors: Vec<String>,
    password2_errors: Vec<String>,
}

#[derive(Template)]
#[template(path = "auth/logout.html")]
struct LogoutTemplate {
    viewer: Option<String>,
}

async fn login_form(Query(query): Query<NextQuery>) -> Result<Response, ResponseError> {
    let template = LoginTemplate::new(query.next.unwrap_or_default(), String::new(), None);
    render_page(&template, None)
}

async fn login_submit(
    State(state): State<AppState>,
    Query(query): Query<NextQuery>,
    Form(input): Form<LoginInput>,
) -> Result<Response, ResponseError> {
    let next = Some(input.next.as_str())
        .filter(|n| !n.is_empty())
        .or(query.next.as_deref())
        .map(str::to_string);

    let outcome = login(&state.data, &state.sessions, &input.form, next.as_deref())
        .await
        .into_response_error()?;

    match outcome {
        FormOutcome::Valid(logged_in) => {
            tracing::debug!("Login succeeded, redirecting to {}", logged_in.redirect_to);
            Ok((
                logged_in.session.headers,
                Redirect::to(&logged_in.redirect_to),
            )
                .into_response())
        }
        FormOutcome::Invalid(errors) => {
            let template = LoginTemplate::new(
                next.unwrap_or_default(),
                input.form.username.clone(),
                Some(&errors),
            );
            render_page(&template, None)
        }
    }
}

/// Ends the session and shows a confirmation page to everyone.
async fn logout_page(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ResponseError> {
    let response_headers = logout(&state.sessions, &headers)
        .await
        .into_response_error()?;
    let page = render_page(&LogoutTemplate { viewer: None }, None)?;
    Ok((response_headers, page).into_response())
}

async fn signup_form() -> Result<Response, ResponseError> {
    let template = SignupTemplate {
        viewer: None,
        username: String::new(),
        username_errors: Vec::new(),
        password1_errors: Vec::new(),
        password2_errors: Vec::new(),
    };
    render_page(&template, None)
}

async fn signup_submit(
    State(state): State<AppState>,
    Form(form): Form<SignupForm>,
) -> Result<Response, ResponseError> {
    match signup(&state.data, &form).await.into_response_error()? {
        FormOutcome::Valid(user) => {
            tracing::debug!(user_id = %user.id, "Signed up, redirecting to login");
            Ok(Redirect::to(LOGIN_URL.as_str()).into_response())
        }
        FormOutcome::Invalid(errors) => {
            let template = SignupTemplate {
                viewer: None,
                username: form.username.clone(),
                username_errors: messages(Some(&errors), "username"),
                password1_errors: messages(Some(&errors), "password1"),
                password2_errors: messages(Some(&errors), "password2"),
            };
            render_page(&template, None)
        }
    }
}
