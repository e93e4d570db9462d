use askama::Template;
use axum::{
    Router,
    extract::{
        Form, Path, State,
        rejection::{FormRejection, PathRejection},
    },
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use http::Uri;

use owner_guard::{
    CommentForm, FormErrors, FormOutcome, News, NewsPage, Operation, create_comment,
    delete_comment, get_owned_comment, home_news, news_detail, update_comment,
};

use super::{
    CsrfForm, NoFields, accept_form, messages, numeric_id, render_page, request_path, viewer_name,
};
use crate::error::{IntoResponseError, ResponseError};
use crate::session::{AuthUser, identity_of};
use crate::state::AppState;
use crate::urls::news_comments_url;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/news/{id}/", get(detail).post(add_comment))
        .route("/edit_comment/{id}/", get(edit_form).post(edit))
        .route(
            "/delete_comment/{id}/",
            get(delete_confirm).post(delete).delete(delete_via_header),
        )
}

#[derive(Template)]
#[template(path = "news/home.html")]
struct HomeTemplate {
    viewer: Option<String>,
    news: Vec<News>,
}

/// One comment as shown in a thread.
struct CommentRow {
    id: i64,
    author_name: String,
    text: String,
    created: String,
    own: bool,
}

#[derive(Template)]
#[template(path = "news/detail.html")]
struct DetailTemplate {
    viewer: Option<String>,
    news: News,
    comments: Vec<CommentRow>,
    show_form: bool,
    csrf_token: String,
    text: String,
    text_errors: Vec<String>,
}

impl DetailTemplate {
    fn new(
        page: NewsPage,
        user: Option<&AuthUser>,
        text: String,
        errors: Option<&FormErrors>,
    ) -> Self {
        let comments = page
            .comments
            .iter()
            .map(|entry| CommentRow {
                id: entry.comment.id,
                author_name: entry.author_name.clone(),
                text: entry.comment.text.clone(),
                created: entry.comment.created.format("%d.%m.%Y %H:%M").to_string(),
                own: page.owns(&entry.comment.id),
            })
            .collect();

        Self {
            viewer: viewer_name(user),
            news: page.news,
            comments,
            show_form: page.show_form,
            csrf_token: user.map(|u| u.csrf_token.clone()).unwrap_or_default(),
            text,
            text_errors: messages(errors, "text"),
        }
    }
}

#[derive(Template)]
#[template(path = "news/edit.html")]
struct EditTemplate {
    viewer: Option<String>,
    comment_id: i64,
    csrf_token: String,
    text: String,
    text_errors: Vec<String>,
}

#[derive(Template)]
#[template(path = "news/delete.html")]
struct DeleteTemplate {
    viewer: Option<String>,
    comment_id: i64,
    csrf_token: String,
    text: String,
}

async fn home(
    State(state): State<AppState>,
    user: Option<AuthUser>,
) -> Result<Response, ResponseError> {
    let news = home_news(&state.data).await.into_response_error()?;
    let template = HomeTemplate {
        viewer: viewer_name(user.as_ref()),
        news,
    };
    render_page(&template, user.as_ref())
}

async fn detail(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Response, ResponseError> {
    let id = numeric_id(id)?;
    let page = news_detail(&state.data, &identity_of(user.as_ref()), id)
        .await
        .into_response_error()?;
    let template = DetailTemplate::new(page, user.as_ref(), String::new(), None);
    render_page(&template, user.as_ref())
}

async fn add_comment(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    uri: Uri,
    id: Result<Path<i64>, PathRejection>,
    form: Result<Form<CsrfForm<CommentForm>>, FormRejection>,
) -> Result<Response, ResponseError> {
    let id = numeric_id(id)?;
    let form = accept_form(user.as_ref(), form)?;
    let identity = identity_of(user.as_ref());
    let outcome = create_comment(&state.data, &identity, id, &form, &request_path(&uri))
        .await
        .into_response_error()?;

    match outcome {
        FormOutcome::Valid(comment) => {
            Ok(Redirect::to(&news_comments_url(comment.news_id)).into_response())
        }
        FormOutcome::Invalid(errors) => {
            let page = news_detail(&state.data, &identity, id)
                .await
                .into_response_error()?;
            let template = DetailTemplate::new(page, user.as_ref(), form.text, Some(&errors));
            render_page(&template, user.as_ref())
        }
    }
}

async fn edit_form(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    uri: Uri,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Response, ResponseError> {
    let id = numeric_id(id)?;
    let comment = get_owned_comment(
        &state.data,
        &identity_of(user.as_ref()),
        id,
        Operation::Edit,
        &request_path(&uri),
    )
    .await
    .into_response_error()?;

    let template = EditTemplate {
        viewer: viewer_name(user.as_ref()),
        comment_id: comment.id,
        csrf_token: user.as_ref().map(|u| u.csrf_token.clone()).unwrap_or_default(),
        text: comment.text,
        text_errors: Vec::new(),
    };
    render_page(&template, user.as_ref())
}

async fn edit(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    uri: Uri,
    id: Result<Path<i64>, PathRejection>,
    form: Result<Form<CsrfForm<CommentForm>>, FormRejection>,
) -> Result<Response, ResponseError> {
    let id = numeric_id(id)?;
    let form = accept_form(user.as_ref(), form)?;
    let outcome = update_comment(
        &state.data,
        &identity_of(user.as_ref()),
        id,
        &form,
        &request_path(&uri),
    )
    .await
    .into_response_error()?;

    match outcome {
        FormOutcome::Valid(comment) => {
            Ok(Redirect::to(&news_comments_url(comment.news_id)).into_response())
        }
        FormOutcome::Invalid(errors) => {
            let template = EditTemplate {
                viewer: viewer_name(user.as_ref()),
                comment_id: id,
                csrf_token: user.as_ref().map(|u| u.csrf_token.clone()).unwrap_or_default(),
                text: form.text,
                text_errors: messages(Some(&errors), "text"),
            };
            render_page(&template, user.as_ref())
        }
    }
}

async fn delete_confirm(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    uri: Uri,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Response, ResponseError> {
    let id = numeric_id(id)?;
    let comment = get_owned_comment(
        &state.data,
        &identity_of(user.as_ref()),
        id,
        Operation::Delete,
        &request_path(&uri),
    )
    .await
    .into_response_error()?;

    let template = DeleteTemplate {
        viewer: viewer_name(user.as_ref()),
        comment_id: comment.id,
        csrf_token: user.as_ref().map(|u| u.csrf_token.clone()).unwrap_or_default(),
        text: comment.text,
    };
    render_page(&template, user.as_ref())
}

async fn delete(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    uri: Uri,
    id: Result<Path<i64>, PathRejection>,
    form: Result<Form<CsrfForm<NoFields>>, FormRejection>,
) -> Result<Response, ResponseError> {
    let id = numeric_id(id)?;
    accept_form(user.as_ref(), form)?;
    remove_comment(&state, user.as_ref(), &uri, id).await
}

/// DELETE carries its CSRF token in the header, which the extractor has checked.
async fn delete_via_header(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    uri: Uri,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Response, ResponseError> {
    let id = numeric_id(id)?;
    remove_comment(&state, user.as_ref(), &uri, id).await
}

async fn remove_comment(
    state: &AppState,
    user: Option<&AuthUser>,
    uri: &Uri,
    id: i64,
) -> Result<Response, ResponseError> {
    let removed = delete_comment(&state.data, &identity_of(user), id, &request_path(uri))
        .await
        .into_response_error()?;
    Ok(Redirect::to(&news_comments_url(removed.news_id)).into_response())
}
