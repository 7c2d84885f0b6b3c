use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type PostId = u64;

/// Author stamped on every post created from this client.
pub const CURRENT_USER: &str = "Current User";

pub const DEFAULT_CATEGORIES: [&str; 4] = ["Development", "React", "JavaScript", "Node.js"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub author: String,
    pub date: NaiveDate,
    pub category: String,
}

impl Post {
    /// Case-insensitive substring match on title, content or category.
    /// `needle` must already be lowercased.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        [&self.title, &self.content, &self.category]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// The editable part of a post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostForm {
    pub title: String,
    pub content: String,
    pub category: String,
}

impl PostForm {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            category: category.into(),
        }
    }

    pub fn from_post(post: &Post) -> Self {
        Self::new(&post.title, &post.content, &post.category)
    }
}
