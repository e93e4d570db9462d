use chrono::Utc;

use crate::guard::UserId;
use crate::storage::{DB_TABLE_COMMENTS, DB_TABLE_NEWS, DB_TABLE_USERS, DataStore};

use super::errors::NewsError;
use super::types::{Comment, CommentDraft, CommentEntry, News, NewsDraft};

pub(crate) struct NewsStore;

impl NewsStore {
    pub(crate) async fn init(store: &DataStore) -> Result<(), NewsError> {
        let table_name = DB_TABLE_NEWS.as_str();

        sqlx::query(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS {table_name} (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                text TEXT NOT NULL,
                date DATE NOT NULL
            )
            "#
        ))
        .execute(store.pool())
        .await?;

        Ok(())
    }

    #[tracing::instrument(skip(store, draft), fields(title = %draft.title))]
    pub(crate) async fn create(store: &DataStore, draft: &NewsDraft) -> Result<News, NewsError> {
        let table_name = DB_TABLE_NEWS.as_str();

        let news = sqlx::query_as::<_, News>(&format!(
            r#"
            INSERT INTO {table_name} (title, text, date)
            VALUES (?, ?, ?)
            RETURNING id, title, text, date
            "#
        ))
        .bind(&draft.title)
        .bind(&draft.text)
        .bind(draft.date)
        .fetch_one(store.pool())
        .await?;

        tracing::debug!(news_id = news.id, "News created");
        Ok(news)
    }

    pub(crate) async fn get(store: &DataStore, id: i64) -> Result<Option<News>, NewsError> {
        let table_name = DB_TABLE_NEWS.as_str();

        Ok(
            sqlx::query_as::<_, News>(&format!("SELECT * FROM {table_name} WHERE id = ?"))
                .bind(id)
                .fetch_optional(store.pool())
                .await?,
        )
    }

    /// Newest `limit` items by date. Items sharing a date keep insertion order reversed.
    pub(crate) async fn list_latest(
        store: &DataStore,
        limit: usize,
    ) -> Result<Vec<News>, NewsError> {
        let table_name = DB_TABLE_NEWS.as_str();

        Ok(sqlx::query_as::<_, News>(&format!(
            "SELECT * FROM {table_name} ORDER BY date DESC, id DESC LIMIT ?"
        ))
        .bind(limit as i64)
        .fetch_all(store.pool())
        .await?)
    }

    pub(crate) async fn count(store: &DataStore) -> Result<i64, NewsError> {
        let table_name = DB_TABLE_NEWS.as_str();

        Ok(sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table_name}"))
            .fetch_one(store.pool())
            .await?)
    }

    /// Remove a news item and, through the foreign key, its comments.
    pub(crate) async fn delete(store: &DataStore, id: i64) -> Result<(), NewsError> {
        let table_name = DB_TABLE_NEWS.as_str();

        let result = sqlx::query(&format!("DELETE FROM {table_name} WHERE id = ?"))
            .bind(id)
            .execute(store.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(NewsError::NewsNotFound);
        }
        Ok(())
    }
}

pub(crate) struct CommentStore;

impl CommentStore {
    /// Create the comments table. Users and news must exist first.
    pub(crate) async fn init(store: &DataStore) -> Result<(), NewsError> {
        let table_name = DB_TABLE_COMMENTS.as_str();
        let news_table = DB_TABLE_NEWS.as_str();
        let users_table = DB_TABLE_USERS.as_str();

        sqlx::query(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS {table_name} (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                news_id INTEGER NOT NULL REFERENCES {news_table}(id) ON DELETE CASCADE,
                author_id TEXT NOT NULL REFERENCES {users_table}(id) ON DELETE CASCADE,
                text TEXT NOT NULL,
                created TIMESTAMP NOT NULL
            )
            "#
        ))
        .execute(store.pool())
        .await?;

        sqlx::query(&format!(
            "CREATE INDEX IF NOT EXISTS idx_{table_name}_news ON {table_name}(news_id)"
        ))
        .execute(store.pool())
        .await?;

        Ok(())
    }

    #[tracing::instrument(skip(store, draft))]
    pub(crate) async fn create(
        store: &DataStore,
        news_id: i64,
        author_id: &UserId,
        draft: &CommentDraft,
    ) -> Result<Comment, NewsError> {
        let table_name = DB_TABLE_COMMENTS.as_str();

        let comment = sqlx::query_as::<_, Comment>(&format!(
            r#"
            INSERT INTO {table_name} (news_id, author_id, text, created)
            VALUES (?, ?, ?, ?)
            RETURNING id, news_id, author_id, text, created
            "#
        ))
        .bind(news_id)
        .bind(author_id)
        .bind(&draft.text)
        .bind(Utc::now())
        .fetch_one(store.pool())
        .await?;

        tracing::info!(comment_id = comment.id, "Comment created");
        Ok(comment)
    }

    pub(crate) async fn get(store: &DataStore, id: i64) -> Result<Option<Comment>, NewsError> {
        let table_name = DB_TABLE_COMMENTS.as_str();

        Ok(
            sqlx::query_as::<_, Comment>(&format!("SELECT * FROM {table_name} WHERE id = ?"))
                .bind(id)
                .fetch_optional(store.pool())
                .await?,
        )
    }

    /// Thread of a news item, oldest comment first.
    pub(crate) async fn list_for_news(
        store: &DataStore,
        news_id: i64,
    ) -> Result<Vec<CommentEntry>, NewsError> {
        let table_name = DB_TABLE_COMMENTS.as_str();
        let users_table = DB_TABLE_USERS.as_str();

        Ok(sqlx::query_as::<_, CommentEntry>(&format!(
            r#"
            SELECT c.id, c.news_id, c.author_id, c.text, c.created, u.username AS author_name
            FROM {table_name} c
            JOIN {users_table} u ON u.id = c.author_id
            WHERE c.news_id = ?
            ORDER BY c.created ASC, c.id ASC
            "#
        ))
        .bind(news_id)
        .fetch_all(store.pool())
        .await?)
    }

    /// Replace the text of comment `id`. Author, news item and timestamp stay.
    pub(crate) async fn update_text(
        store: &DataStore,
        id: i64,
        draft: &CommentDraft,
    ) -> Result<Comment, NewsError> {
        let table_name = DB_TABLE_COMMENTS.as_str();

        sqlx::query_as::<_, Comment>(&format!(
            r#"
            UPDATE {table_name} SET text = ?
            WHERE id = ?
            RETURNING id, news_id, author_id, text, created
            "#
        ))
        .bind(&draft.text)
        .bind(id)
        .fetch_optional(store.pool())
        .await?
        .ok_or(NewsError::CommentNotFound)
    }

    pub(crate) async fn delete(store: &DataStore, id: i64) -> Result<(), NewsError> {
        let table_name = DB_TABLE_COMMENTS.as_str();

        let result = sqlx::query(&format!("DELETE FROM {table_name} WHERE id = ?"))
            .bind(id)
            .execute(store.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(NewsError::CommentNotFound);
        }
        tracing::info!(comment_id = id, "Comment deleted");
        Ok(())
    }

    #[cfg(test)]
    pub(crate) async fn count(store: &DataStore) -> Result<i64, NewsError> {
        let table_name = DB_TABLE_COMMENTS.as_str();

        Ok(sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table_name}"))
            .fetch_one(store.pool())
            .await?)
    }
}
