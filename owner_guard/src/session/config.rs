use std::sync::LazyLock;

pub static SESSION_COOKIE_NAME: LazyLock<String> = LazyLock::new(|| {
    std::env::var("SESSION_COOKIE_NAME")
        .ok()
        .unwrap_or("sessionid".to_string())
});

const DEFAULT_SESSION_COOKIE_MAX_AGE: u64 = 1_209_600; // two weeks

/// Upper bound for `SESSION_COOKIE_MAX_AGE`: ten years.
const SESSION_COOKIE_MAX_AGE_LIMIT: u64 = 315_360_000;

/// Session lifetime in seconds, capped at ten years.
pub static SESSION_COOKIE_MAX_AGE: LazyLock<u64> = LazyLock::new(|| {
    parse_max_age(std::env::var("SESSION_COOKIE_MAX_AGE").ok().as_deref())
});

/// Add the `Secure` attribute to the session cookie. Off by default so the demos
/// work over plain http.
pub static SESSION_COOKIE_SECURE: LazyLock<bool> = LazyLock::new(|| {
    std::env::var("SESSION_COOKIE_SECURE")
        .map(|val| val.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
});

fn parse_max_age(value: Option<&str>) -> u64 {
    match value.map(|v| v.trim().parse::<u64>()) {
        Some(Ok(secs)) if secs > SESSION_COOKIE_MAX_AGE_LIMIT => {
            tracing::warn!(
                "SESSION_COOKIE_MAX_AGE {} too large, using {}",
                secs,
                SESSION_COOKIE_MAX_AGE_LIMIT
            );
            SESSION_COOKIE_MAX_AGE_LIMIT
        }
        Some(Ok(secs)) => secs,
        _ => DEFAULT_SESSION_COOKIE_MAX_AGE,
    }
}
