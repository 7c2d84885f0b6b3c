use async_trait::async_trait;
use tracing::instrument;

use crate::{models::posts::Post, Result};

use super::PostgresRepo;

#[async_trait]
pub trait PostsRepository: Send + Sync {
    /// Every stored post, in whatever order the store yields them.
    async fn get_posts(&self) -> Result<Vec<Post>>;
}

#[async_trait]
impl PostsRepository for PostgresRepo {
    #[instrument(skip(self))]
    async fn get_posts(&self) -> Result<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, body, author, created_at, updated_at FROM posts
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!("Fetched {} posts", posts.len());
        Ok(posts)
    }
}
