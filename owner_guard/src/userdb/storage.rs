use crate::guard::UserId;
use crate::storage::{DB_TABLE_USERS, DataStore};

use super::errors::UserError;
use super::types::User;

pub(crate) struct UserStore;

impl UserStore {
    /// Create the users table
    pub(crate) async fn init(store: &DataStore) -> Result<(), UserError> {
        let table_name = DB_TABLE_USERS.as_str();

        sqlx::query(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS {table_name} (
                id TEXT PRIMARY KEY NOT NULL,
                username TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                created_at TIMESTAMP NOT NULL
            )
            "#
        ))
        .execute(store.pool())
        .await?;

        Ok(())
    }

    #[tracing::instrument(skip(store, user), fields(username = %user.username))]
    pub(crate) async fn insert_user(store: &DataStore, user: User) -> Result<User, UserError> {
        let table_name = DB_TABLE_USERS.as_str();

        let result = sqlx::query(&format!(
            r#"
            INSERT INTO {table_name} (id, username, password_hash, created_at)
            VALUES (?, ?, ?, ?)
            "#
        ))
        .bind(&user.id)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .execute(store.pool())
        .await;

        match result {
            Ok(_) => {
                tracing::info!(user_id = %user.id, "User created");
                Ok(user)
            }
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(UserError::UsernameTaken(user.username))
            }
            Err(e) => {
                tracing::error!(error = %e, "User insert failed");
                Err(e.into())
            }
        }
    }

    #[tracing::instrument(skip(store), fields(user_id = %id))]
    pub(crate) async fn get_user(
        store: &DataStore,
        id: &UserId,
    ) -> Result<Option<User>, UserError> {
        let table_name = DB_TABLE_USERS.as_str();

        let user = sqlx::query_as::<_, User>(&format!("SELECT * FROM {table_name} WHERE id = ?"))
            .bind(id)
            .fetch_optional(store.pool())
            .await?;

        tracing::debug!(found = user.is_some(), "User lookup completed");
        Ok(user)
    }

    pub(crate) async fn get_user_by_username(
        store: &DataStore,
        username: &str,
    ) -> Result<Option<User>, UserError> {
        let table_name = DB_TABLE_USERS.as_str();

        Ok(
            sqlx::query_as::<_, User>(&format!("SELECT * FROM {table_name} WHERE username = ?"))
                .bind(username)
                .fetch_optional(store.pool())
                .await?,
        )
    }
}
