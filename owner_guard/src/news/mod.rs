mod errors;
mod form;
mod storage;
mod types;

pub use errors::NewsError;
pub use form::{BAD_WORDS, CommentForm, WARNING};
pub use types::{Comment, CommentDraft, CommentEntry, News, NewsDraft};

pub(crate) use storage::{CommentStore, NewsStore};
