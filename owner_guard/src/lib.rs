//! owner_guard - ownership-scoped access control for the notes and news applications
//!
//! The crate holds everything below the HTTP layer: the ownership guard, users
//! and sessions, the notes and news domains, their SQLite storage, and the
//! coordination functions that tie them together for each page action.

mod config;
mod coordination;
mod form;
mod guard;
mod news;
mod notes;
mod session;
mod storage;
mod userdb;
mod utils;

#[cfg(test)]
mod test_utils;

pub use config::{DATABASE_URL, LOGIN_REDIRECT_URL, LOGIN_URL, NEWS_COUNT_ON_HOME_PAGE};

pub use coordination::{
    CoordinationError, LoggedIn, NewsPage, create_comment, create_news, create_note, create_user,
    delete_comment, delete_news, delete_note, force_login, get_owned_comment, get_owned_note,
    home_news, list_notes, login, logout, news_detail, seed_demo_news, signup, update_comment,
    update_note,
};

pub use form::{FieldError, FormErrors, FormOutcome, NON_FIELD_ERRORS};

pub use guard::{
    Decision, Identity, Operation, Owned, Stamped, UserId, authorize, filter_owned,
    login_redirect_location, require_login, stamp_owner,
};

pub use news::{
    BAD_WORDS, Comment, CommentDraft, CommentEntry, CommentForm, News, NewsDraft, NewsError,
    WARNING,
};

pub use notes::{
    Note, NoteDraft, NoteError, NoteForm, SLUG_MAX_LEN, SLUG_WARNING, TITLE_MAX_LEN, slugify,
};

pub use session::{
    CsrfToken, IssuedSession, SESSION_COOKIE_MAX_AGE, SESSION_COOKIE_NAME, SESSION_COOKIE_SECURE,
    SessionError, SessionStore, SessionUser, get_session_id_from_headers, load_session,
    verify_csrf_token,
};

pub use storage::{DataStore, StorageError};

pub use userdb::{LoginForm, SignupForm, User, UserError};

pub use utils::{UtilError, gen_random_string};

/// Create every table, parents before children.
pub async fn init(store: &DataStore) -> Result<(), CoordinationError> {
    userdb::UserStore::init(store).await?;
    notes::NoteStore::init(store).await?;
    news::NewsStore::init(store).await?;
    news::CommentStore::init(store).await?;
    tracing::debug!("Tables ready");
    Ok(())
}
