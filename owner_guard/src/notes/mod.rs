mod errors;
mod form;
mod slug;
mod storage;
mod types;

pub use errors::NoteError;
pub use form::{NoteForm, SLUG_MAX_LEN, SLUG_WARNING, TITLE_MAX_LEN};
pub use slug::slugify;
pub use types::{Note, NoteDraft};

pub(crate) use form::duplicate_slug_message;
pub(crate) use storage::NoteStore;
