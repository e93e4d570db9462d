use crate::guard::UserId;
use crate::storage::{DB_TABLE_NOTES, DB_TABLE_USERS, DataStore};

use super::errors::NoteError;
use super::types::{Note, NoteDraft};

pub(crate) struct NoteStore;

impl NoteStore {
    /// Create the notes table. Users must exist first.
    pub(crate) async fn init(store: &DataStore) -> Result<(), NoteError> {
        let table_name = DB_TABLE_NOTES.as_str();
        let users_table = DB_TABLE_USERS.as_str();

        sqlx::query(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS {table_name} (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                text TEXT NOT NULL,
                slug TEXT NOT NULL UNIQUE,
                author_id TEXT NOT NULL REFERENCES {users_table}(id) ON DELETE CASCADE
            )
            "#
        ))
        .execute(store.pool())
        .await?;

        sqlx::query(&format!(
            "CREATE INDEX IF NOT EXISTS idx_{table_name}_author ON {table_name}(author_id)"
        ))
        .execute(store.pool())
        .await?;

        Ok(())
    }

    #[tracing::instrument(skip(store, draft), fields(slug = %draft.slug))]
    pub(crate) async fn create(
        store: &DataStore,
        author_id: &UserId,
        draft: &NoteDraft,
    ) -> Result<Note, NoteError> {
        let table_name = DB_TABLE_NOTES.as_str();

        let result = sqlx::query_as::<_, Note>(&format!(
            r#"
            INSERT INTO {table_name} (title, text, slug, author_id)
            VALUES (?, ?, ?, ?)
            RETURNING id, title, text, slug, author_id
            "#
        ))
        .bind(&draft.title)
        .bind(&draft.text)
        .bind(&draft.slug)
        .bind(author_id)
        .fetch_one(store.pool())
        .await;

        match result {
            Ok(note) => {
                tracing::info!(note_id = note.id, %author_id, "Note created");
                Ok(note)
            }
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(NoteError::SlugConflict(draft.slug.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub(crate) async fn get_by_slug(
        store: &DataStore,
        slug: &str,
    ) -> Result<Option<Note>, NoteError> {
        let table_name = DB_TABLE_NOTES.as_str();

        Ok(
            sqlx::query_as::<_, Note>(&format!("SELECT * FROM {table_name} WHERE slug = ?"))
                .bind(slug)
                .fetch_optional(store.pool())
                .await?,
        )
    }

    /// Notes written by `author_id`, oldest first.
    pub(crate) async fn list_by_author(
        store: &DataStore,
        author_id: &UserId,
    ) -> Result<Vec<Note>, NoteError> {
        let table_name = DB_TABLE_NOTES.as_str();

        Ok(sqlx::query_as::<_, Note>(&format!(
            "SELECT * FROM {table_name} WHERE author_id = ? ORDER BY id"
        ))
        .bind(author_id)
        .fetch_all(store.pool())
        .await?)
    }

    /// Whether some note other than `exclude_id` already uses `slug`.
    pub(crate) async fn slug_exists(
        store: &DataStore,
        slug: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, NoteError> {
        let table_name = DB_TABLE_NOTES.as_str();

        let count: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM {table_name} WHERE slug = ? AND id != ?"
        ))
        .bind(slug)
        .bind(exclude_id.unwrap_or(-1))
        .fetch_one(store.pool())
        .await?;

        Ok(count > 0)
    }

    /// Replace the content of note `id`. The author is left untouched.
    #[tracing::instrument(skip(store, draft), fields(slug = %draft.slug))]
    pub(crate) async fn update(
        store: &DataStore,
        id: i64,
        draft: &NoteDraft,
    ) -> Result<Note, NoteError> {
        let table_name = DB_TABLE_NOTES.as_str();

        let result = sqlx::query_as::<_, Note>(&format!(
            r#"
            UPDATE {table_name} SET title = ?, text = ?, slug = ?
            WHERE id = ?
            RETURNING id, title, text, slug, author_id
            "#
        ))
        .bind(&draft.title)
        .bind(&draft.text)
        .bind(&draft.slug)
        .bind(id)
        .fetch_optional(store.pool())
        .await;

        match result {
            Ok(Some(note)) => Ok(note),
            Ok(None) => Err(NoteError::NotFound),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(NoteError::SlugConflict(draft.slug.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub(crate) async fn delete(store: &DataStore, id: i64) -> Result<(), NoteError> {
        let table_name = DB_TABLE_NOTES.as_str();

        let result = sqlx::query(&format!("DELETE FROM {table_name} WHERE id = ?"))
            .bind(id)
            .execute(store.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(NoteError::NotFound);
        }
        tracing::info!(note_id = id, "Note deleted");
        Ok(())
    }

    #[cfg(test)]
    pub(crate) async fn count(store: &DataStore) -> Result<i64, NoteError> {
        let table_name = DB_TABLE_NOTES.as_str();

        Ok(sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table_name}"))
            .fetch_one(store.pool())
            .await?)
    }
}
