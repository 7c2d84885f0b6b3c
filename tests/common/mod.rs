use std::{net::SocketAddr, sync::Arc};

use mern_blog::{config::Config, repositories::InMemoryRepo, routes::create_router, AppState};
use tokio::net::TcpListener;

pub fn test_config() -> Config {
    Config {
        database_url: None,
        jwt_secret: "integration-secret".to_string(),
        jwt_maxage: 60,
        port: 0,
    }
}

/// Serves the API from `repo` on an ephemeral port and returns the `/api` base url.
pub async fn spawn_app(repo: InMemoryRepo) -> anyhow::Result<String> {
    let repo = Arc::new(repo);
    let state = AppState::new(test_config(), repo.clone(), repo);
    let app = create_router(Arc::new(state));

    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    Ok(format!("http://{addr}/api"))
}
