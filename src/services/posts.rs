use std::sync::Arc;

use tracing::error;

use crate::{models::posts::Post, repositories::posts_repo::PostsRepository, Error, Result};

#[derive(Clone)]
pub struct PostsService {
    repo: Arc<dyn PostsRepository>,
}

impl PostsService {
    pub fn new(repo: Arc<dyn PostsRepository>) -> Self {
        Self { repo }
    }

    /// Storage failures are logged and collapsed into an opaque internal error; there is no retry.
    pub async fn get_posts(&self) -> Result<Vec<Post>> {
        self.repo.get_posts().await.map_err(|err| {
            error!("Error fetching posts: {:?}", err);
            Error::InternalServerError
        })
    }
}
