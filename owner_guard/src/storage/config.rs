//! Database table configuration

use std::{env, sync::LazyLock};

/// Table prefix from environment variable
pub(crate) static DB_TABLE_PREFIX: LazyLock<String> =
    LazyLock::new(|| env::var("DB_TABLE_PREFIX").unwrap_or_else(|_| "og_".to_string()));

pub(crate) static DB_TABLE_USERS: LazyLock<String> =
    LazyLock::new(|| format!("{}users", *DB_TABLE_PREFIX));

pub(crate) static DB_TABLE_NOTES: LazyLock<String> =
    LazyLock::new(|| format!("{}notes", *DB_TABLE_PREFIX));

pub(crate) static DB_TABLE_NEWS: LazyLock<String> =
    LazyLock::new(|| format!("{}news", *DB_TABLE_PREFIX));

pub(crate) static DB_TABLE_COMMENTS: LazyLock<String> =
    LazyLock::new(|| format!("{}comments", *DB_TABLE_PREFIX));
