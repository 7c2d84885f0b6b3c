use std::sync::Arc;

use mern_blog::{
    config::Config,
    repositories::{InMemoryRepo, PostgresRepo},
    routes::create_router,
    AppState,
};
use sqlx::postgres::PgPoolOptions;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::init();

    let app_state = match config.database_url.as_deref() {
        Some(database_url) => {
            let pool = match PgPoolOptions::new()
                .max_connections(10)
                .connect(database_url)
                .await
            {
                Ok(pool) => {
                    info!("Connection to the database is successful");
                    pool
                }
                Err(err) => {
                    error!("Failed to connect to the database: {:?}", err);
                    std::process::exit(1);
                }
            };

            if let Err(err) = sqlx::migrate!("./migrations").run(&pool).await {
                error!("Failed to run migrations: {:?}", err);
                std::process::exit(1);
            }

            let repo = Arc::new(PostgresRepo::new(pool));
            AppState::new(config.clone(), repo.clone(), repo)
        }
        None => {
            let repo = Arc::new(InMemoryRepo::new());
            AppState::new(config.clone(), repo.clone(), repo)
        }
    };

    let app = create_router(Arc::new(app_state));

    let listener = match tokio::net::TcpListener::bind(format!("[::]:{}", config.port)).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("Failed to bind port {}: {:?}", config.port, err);
            std::process::exit(1);
        }
    };
    info!("Listening on port {}", config.port);

    if let Err(err) = axum::serve(listener, app).await {
        error!("Server error: {:?}", err);
    }
}
