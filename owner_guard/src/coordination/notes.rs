use crate::form::{FormErrors, FormOutcome};
use crate::guard::{Identity, Operation, filter_owned, stamp_owner};
use crate::notes::{Note, NoteDraft, NoteError, NoteForm, NoteStore};
use crate::storage::DataStore;

use super::auth_helpers::{deny, ensure_logged_in, ensure_owner};
use super::errors::CoordinationError;

const NOTE: &str = "Note";

/// Notes written by the requester.
pub async fn list_notes(
    data: &DataStore,
    requester: &Identity,
    next: &str,
) -> Result<Vec<Note>, CoordinationError> {
    let user_id = ensure_logged_in(requester, next)?;
    let notes = NoteStore::list_by_author(data, user_id).await?;
    Ok(filter_owned(requester, notes))
}

/// The note at `slug`, if the requester wrote it.
pub async fn get_owned_note(
    data: &DataStore,
    requester: &Identity,
    slug: &str,
    operation: Operation,
    next: &str,
) -> Result<Note, CoordinationError> {
    let note = NoteStore::get_by_slug(data, slug).await?;
    ensure_owner(requester, note, operation, next, NOTE, slug)
}

/// Create a note owned by the requester.
///
/// The slug is taken from the form or derived from the title, and must not be
/// used by any other note.
#[tracing::instrument(skip(data, form))]
pub async fn create_note(
    data: &DataStore,
    requester: &Identity,
    form: &NoteForm,
    next: &str,
) -> Result<FormOutcome<Note>, CoordinationError> {
    let stamped = stamp_owner(requester, form, next).map_err(|d| deny(d, NOTE, ""))?;

    let draft = match validate(data, stamped.draft(), None).await? {
        FormOutcome::Valid(draft) => draft,
        FormOutcome::Invalid(errors) => return Ok(FormOutcome::Invalid(errors)),
    };

    match NoteStore::create(data, stamped.owner(), &draft).await {
        Ok(note) => Ok(FormOutcome::Valid(note)),
        // lost a race with another insert of the same slug
        Err(NoteError::SlugConflict(slug)) => Ok(FormOutcome::Invalid(slug_taken(&slug))),
        Err(e) => Err(e.into()),
    }
}

/// Replace the content of the requester's note at `slug`.
#[tracing::instrument(skip(data, form))]
pub async fn update_note(
    data: &DataStore,
    requester: &Identity,
    slug: &str,
    form: &NoteForm,
    next: &str,
) -> Result<FormOutcome<Note>, CoordinationError> {
    let note = get_owned_note(data, requester, slug, Operation::Edit, next).await?;

    let draft = match validate(data, form, Some(note.id)).await? {
        FormOutcome::Valid(draft) => draft,
        FormOutcome::Invalid(errors) => return Ok(FormOutcome::Invalid(errors)),
    };

    match NoteStore::update(data, note.id, &draft).await {
        Ok(note) => Ok(FormOutcome::Valid(note)),
        Err(NoteError::SlugConflict(slug)) => Ok(FormOutcome::Invalid(slug_taken(&slug))),
        Err(e) => Err(e.into()),
    }
}

/// Delete the requester's note at `slug`.
#[tracing::instrument(skip(data))]
pub async fn delete_note(
    data: &DataStore,
    requester: &Identity,
    slug: &str,
    next: &str,
) -> Result<(), CoordinationError> {
    let note = get_owned_note(data, requester, slug, Operation::Delete, next).await?;
    NoteStore::delete(data, note.id).await?;
    Ok(())
}

/// Field checks plus slug uniqueness against every other note.
async fn validate(
    data: &DataStore,
    form: &NoteForm,
    current_id: Option<i64>,
) -> Result<FormOutcome<NoteDraft>, CoordinationError> {
    let draft = match form.clean() {
        FormOutcome::Valid(draft) => draft,
        invalid => return Ok(invalid),
    };

    if NoteStore::slug_exists(data, &draft.slug, current_id).await? {
        tracing::debug!(slug = %draft.slug, "Slug already taken");
        return Ok(FormOutcome::Invalid(slug_taken(&draft.slug)));
    }
    Ok(FormOutcome::Valid(draft))
}

fn slug_taken(slug: &str) -> FormErrors {
    let mut errors = FormErrors::new();
    errors.add("slug", crate::notes::duplicate_slug_message(slug));
    errors
}
