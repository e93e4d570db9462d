//! Central configuration for the owner_guard crate

use std::sync::LazyLock;

/// URL of the login page that anonymous visitors are sent to.
/// Default: "/auth/login/"
pub static LOGIN_URL: LazyLock<String> =
    LazyLock::new(|| std::env::var("LOGIN_URL").unwrap_or_else(|_| "/auth/login/".to_string()));

/// Where a successful login lands when no usable `next` continuation was given.
/// Default: "/"
pub static LOGIN_REDIRECT_URL: LazyLock<String> = LazyLock::new(|| {
    std::env::var("LOGIN_REDIRECT_URL").unwrap_or_else(|_| "/".to_string())
});

/// Maximum number of news items on the news home page.
pub static NEWS_COUNT_ON_HOME_PAGE: LazyLock<usize> = LazyLock::new(|| {
    parse_news_count(std::env::var("NEWS_COUNT_ON_HOME_PAGE").ok().as_deref())
});

/// Connection string of the SQLite database.
/// Default: in-memory database
pub static DATABASE_URL: LazyLock<String> = LazyLock::new(|| {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite::memory:".to_string())
});

/// PBKDF2 iteration count used for new password hashes.
pub(crate) static PASSWORD_HASH_ITERATIONS: LazyLock<u32> = LazyLock::new(|| {
    std::env::var("PASSWORD_HASH_ITERATIONS")
        .ok()
        .and_then(|s| s.parse().ok())
        .filter(|n| *n > 0)
        .unwrap_or(100_000)
});

fn parse_news_count(value: Option<&str>) -> usize {
    value
        .and_then(|s| s.parse().ok())
        .filter(|n| *n > 0)
        .unwrap_or(10)
}
