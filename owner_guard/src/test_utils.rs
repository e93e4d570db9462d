//! Shared fixtures for unit tests

use crate::storage::DataStore;
use crate::userdb::{User, UserStore};

/// Fresh in-memory database with every table created.
pub(crate) async fn test_store() -> DataStore {
    let store = DataStore::in_memory().await.expect("in-memory store");
    crate::init(&store).await.expect("create tables");
    store
}

/// Insert a user whose password can never match.
pub(crate) async fn test_user(store: &DataStore, username: &str) -> User {
    UserStore::insert_user(store, User::new(username.to_string(), "!".to_string()))
        .await
        .expect("insert test user")
}
