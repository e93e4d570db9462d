use dotenvy::dotenv;

use owner_guard_axum::owner_guard::{DATABASE_URL, DataStore, init};
use owner_guard_axum::{AppState, notes_router};

mod server;
use server::{init_tracing, port_from_env, serve_http};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    init_tracing("demo_notes");

    let data = DataStore::connect(DATABASE_URL.as_str()).await?;
    init(&data).await?;

    let app = notes_router(AppState::new(data));
    serve_http(port_from_env(3001), app).await?;
    Ok(())
}
