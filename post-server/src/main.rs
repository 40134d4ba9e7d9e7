use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;

use application::post_service::PostService;
use data::post_repository::{PostRepository, SharedPostRepository};
use data::repositories::memory::post_repository::InMemoryPostRepository;
use data::repositories::postgres::post_repository::PostgresPostRepository;
use infrastructure::database::{create_pool, run_migrations};
use infrastructure::logging::init_logging;
use infrastructure::settings::Settings;
use presentation::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level, settings.log_format)?;

    let repo: SharedPostRepository = match &settings.database_url {
        Some(database_url) => {
            let pool = create_pool(database_url, settings.database_max_connections).await?;
            run_migrations(&pool).await?;
            Arc::new(PostgresPostRepository::new(pool))
        }
        None => {
            warn!("DATABASE_URL is not set, posts are kept in memory only");
            Arc::new(InMemoryPostRepository::new())
        }
    };

    let posts = repo.count().await?;
    info!(posts, "post store ready");

    let state = AppState::new(Arc::new(PostService::new(repo)));
    server::run_http(&settings, state).await
}
