//! User-visible operations
//!
//! Each function here combines the requester's identity, the ownership guard,
//! form validation and storage for one page action of the notes or news
//! applications. Guard denials come back as [`CoordinationError::LoginRequired`]
//! or [`CoordinationError::ResourceNotFound`]; rejected form input comes back as
//! `Ok(FormOutcome::Invalid(..))`.

mod auth_helpers;
mod errors;
mod news;
mod notes;
mod user;

pub use errors::CoordinationError;

pub use notes::{create_note, delete_note, get_owned_note, list_notes, update_note};

pub use news::{
    NewsPage, create_comment, create_news, delete_comment, delete_news, get_owned_comment,
    home_news, news_detail, seed_demo_news, update_comment,
};

pub use user::{LoggedIn, create_user, force_login, login, logout, signup};
