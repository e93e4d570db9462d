use dotenvy::dotenv;

use owner_guard_axum::owner_guard::{
    DATABASE_URL, DataStore, NEWS_COUNT_ON_HOME_PAGE, init, seed_demo_news,
};
use owner_guard_axum::{AppState, SEED_DEMO_NEWS, news_router};

mod server;
use server::{init_tracing, port_from_env, serve_http};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    init_tracing("demo_news");

    let data = DataStore::connect(DATABASE_URL.as_str()).await?;
    init(&data).await?;

    if *SEED_DEMO_NEWS {
        // One more than fits on the home page, so the cut-off is visible.
        seed_demo_news(&data, *NEWS_COUNT_ON_HOME_PAGE + 1).await?;
    }

    let app = news_router(AppState::new(data));
    serve_http(port_from_env(3002), app).await?;
    Ok(())
}
