//! owner_guard_axum - Axum pages and routers for the notes and news applications

mod config;
mod error;
mod pages;
mod router;
mod session;
mod state;
mod urls;

pub use config::{RESPOND_WITH_X_CSRF_TOKEN, SEED_DEMO_NEWS};
pub use error::ResponseError;
pub use router::{news_router, news_router_no_trace, notes_router, notes_router_no_trace};
pub use session::AuthUser;
pub use state::AppState;

// Re-export the core crate so applications need only one dependency
pub use owner_guard;
