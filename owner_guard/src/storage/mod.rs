mod config;
mod errors;
mod types;

pub use errors::StorageError;
pub use types::DataStore;

pub(crate) use config::{DB_TABLE_COMMENTS, DB_TABLE_NEWS, DB_TABLE_NOTES, DB_TABLE_USERS};
