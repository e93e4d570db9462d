//! Routers for the notes and news applications

use axum::Router;
use tower_http::LatencyUnit;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::pages::{auth_router, news_routes, notes_routes};
use crate::state::AppState;

fn with_trace(router: Router) -> Router {
    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(
                DefaultMakeSpan::new()
                    .level(Level::INFO)
                    .include_headers(true),
            )
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(
                DefaultOnResponse::new()
                    .level(Level::INFO)
                    .latency_unit(LatencyUnit::Millis),
            ),
    )
}

/// Router for the notes application
///
/// - `/` home page
/// - `/notes/`, `/add/`, `/done/` for logged-in users
/// - `/note/{slug}/`, `/edit/{slug}/`, `/delete/{slug}/` for the note's author
/// - `/auth/login/`, `/auth/logout/`, `/auth/signup/`
pub fn notes_router(state: AppState) -> Router {
    with_trace(notes_router_no_trace(state))
}

/// Same as `notes_router()` but without the HTTP tracing middleware.
pub fn notes_router_no_trace(state: AppState) -> Router {
    notes_routes()
        .nest("/auth", auth_router())
        .with_state(state)
}

/// Router for the news application
///
/// - `/` latest news
/// - `/news/{id}/` news item with comments; POST adds a comment
/// - `/edit_comment/{id}/`, `/delete_comment/{id}/` for the comment's author
/// - `/auth/login/`, `/auth/logout/`, `/auth/signup/`
pub fn news_router(state: AppState) -> Router {
    with_trace(news_router_no_trace(state))
}

/// Same as `news_router()` but without the HTTP tracing middleware.
pub fn news_router_no_trace(state: AppState) -> Router {
    news_routes()
        .nest("/auth", auth_router())
        .with_state(state)
}
