use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use super::types::StoredSession;

/// In-memory session table keyed by session id.
#[derive(Clone, Debug, Default)]
pub struct SessionStore {
    entries: Arc<Mutex<HashMap<String, StoredSession>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        tracing::info!("Creating new in-memory session store");
        Self::default()
    }

    pub(crate) async fn put(&self, session_id: &str, session: StoredSession) {
        self.entries
            .lock()
            .await
            .insert(session_id.to_string(), session);
    }

    pub(crate) async fn get(&self, session_id: &str) -> Option<StoredSession> {
        self.entries.lock().await.get(session_id).cloned()
    }

    pub(crate) async fn remove(&self, session_id: &str) {
        self.entries.lock().await.remove(session_id);
    }

    /// Number of live entries (expired ones included until they are looked up).
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
