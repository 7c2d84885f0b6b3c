use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_AUTHOR: &str = "Anonymous";

/// A stored blog post as returned by `GET /api/posts`.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone, PartialEq)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub author: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Title and body are stored trimmed; only a missing author becomes "Anonymous".
    pub fn new(title: &str, body: &str, author: Option<&str>) -> Self {
        let now = Utc::now();
        let author = author.unwrap_or(DEFAULT_AUTHOR);

        Self {
            id: Uuid::now_v7(),
            title: title.trim().to_string(),
            body: body.trim().to_string(),
            author: author.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}
