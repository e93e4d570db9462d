use owner_guard::{DataStore, SessionStore};

/// Shared state handed to every handler.
#[derive(Clone, Debug)]
pub struct AppState {
    pub data: DataStore,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(data: DataStore) -> Self {
        Self {
            data,
            sessions: SessionStore::new(),
        }
    }
}
