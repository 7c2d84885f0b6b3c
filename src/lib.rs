use std::sync::Arc;

use config::Config;
use repositories::{posts_repo::PostsRepository, user_repo::UserRepository};
use services::{auth::AuthService, posts::PostsService};

pub use self::errors::{Error, Result};

pub mod client;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub auth_service: AuthService,
    pub posts_service: PostsService,
}

impl AppState {
    pub fn new(
        config: Config,
        posts_repo: Arc<dyn PostsRepository>,
        user_repo: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            auth_service: AuthService::new(
                user_repo,
                config.jwt_secret.clone(),
                config.jwt_maxage,
            ),
            posts_service: PostsService::new(posts_repo),
            config,
        }
    }
}
