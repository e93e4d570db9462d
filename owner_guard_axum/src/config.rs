//! Central configuration for the owner_guard_axum crate

use std::sync::LazyLock;

/// Header that carries the CSRF token on state-changing requests.
pub(crate) const CSRF_HEADER: &str = "X-CSRF-Token";

/// Whether pages rendered for a logged-in user echo the session's CSRF token in
/// an `X-CSRF-Token` response header, for scripts that send DELETE requests.
/// Default: true
pub static RESPOND_WITH_X_CSRF_TOKEN: LazyLock<bool> = LazyLock::new(|| {
    parse_flag(
        std::env::var("RESPOND_WITH_X_CSRF_TOKEN").ok().as_deref(),
        true,
    )
});

/// Whether the news server fills an empty news table with sample items on start.
/// Default: false
pub static SEED_DEMO_NEWS: LazyLock<bool> = LazyLock::new(|| {
    parse_flag(std::env::var("SEED_DEMO_NEWS").ok().as_deref(), false)
});

fn parse_flag(value: Option<&str>, default: bool) -> bool {
    value
        .map(|val| val.to_lowercase() != "false")
        .unwrap_or(default)
}
