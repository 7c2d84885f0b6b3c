use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    models::{posts::Post, users::User},
    Error, Result,
};

use super::{posts_repo::PostsRepository, user_repo::UserRepository};

/// Process-local store used when no database is configured, and by the tests.
/// Posts come back in insertion order.
#[derive(Default)]
pub struct InMemoryRepo {
    posts: RwLock<Vec<Post>>,
    users: RwLock<Vec<User>>,
    fail_reads: bool,
}

impl InMemoryRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_posts(posts: Vec<Post>) -> Self {
        Self {
            posts: RwLock::new(posts),
            ..Self::default()
        }
    }

    /// A store whose every read fails, for exercising the error paths.
    pub fn failing() -> Self {
        Self {
            fail_reads: true,
            ..Self::default()
        }
    }

    pub async fn insert_post(&self, post: Post) {
        self.posts.write().await.push(post);
    }

    fn check_available(&self) -> Result<()> {
        if self.fail_reads {
            return Err(Error::StoreUnavailable(
                "in-memory store configured to fail".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl PostsRepository for InMemoryRepo {
    async fn get_posts(&self) -> Result<Vec<Post>> {
        self.check_available()?;
        Ok(self.posts.read().await.clone())
    }
}

#[async_trait]
impl UserRepository for InMemoryRepo {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        self.check_available()?;
        let users = self.users.read().await;
        Ok(users.iter().find(|user| user.username == username).cloned())
    }

    async fn create_user(
        &self,
        username: String,
        email: String,
        password: String,
    ) -> Result<User> {
        self.check_available()?;
        let mut users = self.users.write().await;
        // mirrors the UNIQUE constraint on users.username
        if users.iter().any(|user| user.username == username) {
            return Err(Error::BadRequest("Username already exists".to_string()));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            username,
            email,
            password,
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }
}
