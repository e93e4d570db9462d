use askama::Template;
use axum::{
    Router,
    extract::{Form, Path, State, rejection::FormRejection},
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use http::Uri;

use owner_guard::{
    FormErrors, FormOutcome, Note, NoteForm, Operation, create_note, delete_note, get_owned_note,
    list_notes, update_note,
};

use super::{CsrfForm, NoFields, accept_form, messages, render_page, request_path, viewer_name};
use crate::error::{IntoResponseError, ResponseError};
use crate::session::{AuthUser, identity_of};
use crate::state::AppState;
use crate::urls::NOTES_SUCCESS_URL;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/notes/", get(list))
        .route("/add/", get(add_form).post(add))
        .route("/done/", get(success))
        .route("/note/{slug}/", get(detail))
        .route("/edit/{slug}/", get(edit_form).post(edit))
        .route("/delete/{slug}/", get(delete_confirm).post(delete))
}

#[derive(Template)]
#[template(path = "notes/home.html")]
struct HomeTemplate {
    viewer: Option<String>,
}

#[derive(Template)]
#[template(path = "notes/list.html")]
struct ListTemplate {
    viewer: Option<String>,
    notes: Vec<Note>,
}

#[derive(Template)]
#[template(path = "notes/detail.html")]
struct DetailTemplate {
    viewer: Option<String>,
    note: Note,
}

#[derive(Template)]
#[template(path = "notes/delete.html")]
struct DeleteTemplate {
    viewer: Option<String>,
    note: Note,
    csrf_token: String,
}

#[derive(Template)]
#[template(path = "notes/success.html")]
struct SuccessTemplate {
    viewer: Option<String>,
}

#[derive(Template)]
#[template(path = "notes/form.html")]
struct FormTemplate {
    viewer: Option<String>,
    heading: &'static str,
    action: String,
    csrf_token: String,
    title: String,
    text: String,
    slug: String,
    title_errors: Vec<String>,
    text_errors: Vec<String>,
    slug_errors: Vec<String>,
}

impl FormTemplate {
    fn new(
        user: &AuthUser,
        heading: &'static str,
        action: String,
        form: &NoteForm,
        errors: Option<&FormErrors>,
    ) -> Self {
        Self {
            viewer: Some(user.username.clone()),
            heading,
            action,
            csrf_token: user.csrf_token.clone(),
            title: form.title.clone(),
            text: form.text.clone(),
            slug: form.slug.clone().unwrap_or_default(),
            title_errors: messages(errors, "title"),
            text_errors: messages(errors, "text"),
            slug_errors: messages(errors, "slug"),
        }
    }
}

fn filled(note: &Note) -> NoteForm {
    NoteForm {
        title: note.title.clone(),
        text: note.text.clone(),
        slug: Some(note.slug.clone()),
    }
}

/// The requester behind a page that requires login; anonymous visitors are redirected.
fn logged_in<'a>(user: Option<&'a AuthUser>, uri: &Uri) -> Result<&'a AuthUser, ResponseError> {
    user.ok_or_else(|| {
        tracing::debug!("Anonymous visitor sent to login");
        ResponseError::LoginRedirect {
            next: request_path(uri),
        }
    })
}

async fn home(user: Option<AuthUser>) -> Result<Response, ResponseError> {
    let template = HomeTemplate {
        viewer: viewer_name(user.as_ref()),
    };
    render_page(&template, user.as_ref())
}

async fn list(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    uri: Uri,
) -> Result<Response, ResponseError> {
    let notes = list_notes(&state.data, &identity_of(user.as_ref()), &request_path(&uri))
        .await
        .into_response_error()?;
    let template = ListTemplate {
        viewer: viewer_name(user.as_ref()),
        notes,
    };
    render_page(&template, user.as_ref())
}

async fn add_form(user: Option<AuthUser>, uri: Uri) -> Result<Response, ResponseError> {
    let user = logged_in(user.as_ref(), &uri)?;
    let template = FormTemplate::new(
        user,
        "Добавить заметку",
        uri.path().to_string(),
        &NoteForm::default(),
        None,
    );
    render_page(&template, Some(user))
}

async fn add(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    uri: Uri,
    form: Result<Form<CsrfForm<NoteForm>>, FormRejection>,
) -> Result<Response, ResponseError> {
    let form = accept_form(user.as_ref(), form)?;
    let outcome = create_note(
        &state.data,
        &identity_of(user.as_ref()),
        &form,
        &request_path(&uri),
    )
    .await
    .into_response_error()?;

    match (outcome, user.as_ref()) {
        (FormOutcome::Valid(_), _) => Ok(Redirect::to(NOTES_SUCCESS_URL).into_response()),
        (FormOutcome::Invalid(errors), Some(user)) => {
            let template = FormTemplate::new(
                user,
                "Добавить заметку",
                uri.path().to_string(),
                &form,
                Some(&errors),
            );
            render_page(&template, Some(user))
        }
        // create_note turns anonymous requesters away before validating
        (FormOutcome::Invalid(_), None) => Err(ResponseError::LoginRedirect {
            next: request_path(&uri),
        }),
    }
}

async fn success(user: Option<AuthUser>, uri: Uri) -> Result<Response, ResponseError> {
    let user = logged_in(user.as_ref(), &uri)?;
    let template = SuccessTemplate {
        viewer: Some(user.username.clone()),
    };
    render_page(&template, Some(user))
}

async fn detail(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    uri: Uri,
    Path(slug): Path<String>,
) -> Result<Response, ResponseError> {
    let note = get_owned_note(
        &state.data,
        &identity_of(user.as_ref()),
        &slug,
        Operation::ReadDetail,
        &request_path(&uri),
    )
    .await
    .into_response_error()?;

    let template = DetailTemplate {
        viewer: viewer_name(user.as_ref()),
        note,
    };
    render_page(&template, user.as_ref())
}

async fn edit_form(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    uri: Uri,
    Path(slug): Path<String>,
) -> Result<Response, ResponseError> {
    let note = get_owned_note(
        &state.data,
        &identity_of(user.as_ref()),
        &slug,
        Operation::Edit,
        &request_path(&uri),
    )
    .await
    .into_response_error()?;
    let user = logged_in(user.as_ref(), &uri)?;

    let template = FormTemplate::new(
        user,
        "Редактировать заметку",
        uri.path().to_string(),
        &filled(&note),
        None,
    );
    render_page(&template, Some(user))
}

async fn edit(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    uri: Uri,
    Path(slug): Path<String>,
    form: Result<Form<CsrfForm<NoteForm>>, FormRejection>,
) -> Result<Response, ResponseError> {
    let form = accept_form(user.as_ref(), form)?;
    let outcome = update_note(
        &state.data,
        &identity_of(user.as_ref()),
        &slug,
        &form,
        &request_path(&uri),
    )
    .await
    .into_response_error()?;

    match outcome {
        FormOutcome::Valid(_) => Ok(Redirect::to(NOTES_SUCCESS_URL).into_response()),
        FormOutcome::Invalid(errors) => {
            let user = logged_in(user.as_ref(), &uri)?;
            let template = FormTemplate::new(
                user,
                "Редактировать заметку",
                uri.path().to_string(),
                &form,
                Some(&errors),
            );
            render_page(&template, Some(user))
        }
    }
}

async fn delete_confirm(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    uri: Uri,
    Path(slug): Path<String>,
) -> Result<Response, ResponseError> {
    let note = get_owned_note(
        &state.data,
        &identity_of(user.as_ref()),
        &slug,
        Operation::Delete,
        &request_path(&uri),
    )
    .await
    .into_response_error()?;
    let user = logged_in(user.as_ref(), &uri)?;

    let template = DeleteTemplate {
        viewer: Some(user.username.clone()),
        note,
        csrf_token: user.csrf_token.clone(),
    };
    render_page(&template, Some(user))
}

async fn delete(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    uri: Uri,
    Path(slug): Path<String>,
    form: Result<Form<CsrfForm<NoFields>>, FormRejection>,
) -> Result<Response, ResponseError> {
    accept_form(user.as_ref(), form)?;
    delete_note(
        &state.data,
        &identity_of(user.as_ref()),
        &slug,
        &request_path(&uri),
    )
    .await
    .into_response_error()?;

    Ok(Redirect::to(NOTES_SUCCESS_URL).into_response())
}
