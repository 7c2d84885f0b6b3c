use chrono::NaiveDate;
use tracing::debug;

use super::post::{Post, PostForm, PostId, CURRENT_USER, DEFAULT_CATEGORIES};

/// Ordered, newest-first collection of posts held by the client.
///
/// Ids come from a counter that only moves forward, so an id freed by a delete is never
/// handed out again.
#[derive(Debug, Clone)]
pub struct PostStore {
    posts: Vec<Post>,
    categories: Vec<String>,
    next_id: PostId,
}

impl Default for PostStore {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl PostStore {
    pub fn new(posts: Vec<Post>) -> Self {
        let next_id = posts.iter().map(|post| post.id).max().unwrap_or(0) + 1;
        Self {
            posts,
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            next_id,
        }
    }

    /// The two posts the blog starts out with.
    pub fn seeded() -> Self {
        Self::new(vec![
            Post {
                id: 1,
                title: "Getting Started with MERN Stack".to_string(),
                content: "Learn how to build full-stack applications with MongoDB, Express, \
                          React, and Node.js."
                    .to_string(),
                author: "John Doe".to_string(),
                date: NaiveDate::from_ymd_opt(2023, 5, 15).unwrap_or_default(),
                category: "Development".to_string(),
            },
            Post {
                id: 2,
                title: "React Hooks Explained".to_string(),
                content: "A deep dive into React Hooks and how they simplify state management \
                          in functional components."
                    .to_string(),
                author: "Jane Smith".to_string(),
                date: NaiveDate::from_ymd_opt(2023, 5, 10).unwrap_or_default(),
                category: "React".to_string(),
            },
        ])
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn get(&self, id: PostId) -> Option<&Post> {
        self.posts.iter().find(|post| post.id == id)
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|known| known == category)
    }

    /// Prepends a new post authored by the current user and returns it.
    pub fn create(&mut self, form: PostForm, date: NaiveDate) -> &Post {
        let id = self.next_id;
        self.next_id += 1;

        self.posts.insert(
            0,
            Post {
                id,
                title: form.title,
                content: form.content,
                author: CURRENT_USER.to_string(),
                date,
                category: form.category,
            },
        );
        debug!(id, "created post");
        &self.posts[0]
    }

    /// Overwrites title, content and category of the post with `id`.
    /// Returns `false` when no such post exists.
    pub fn update(&mut self, id: PostId, form: PostForm) -> bool {
        match self.posts.iter_mut().find(|post| post.id == id) {
            Some(post) => {
                post.title = form.title;
                post.content = form.content;
                post.category = form.category;
                debug!(id, "updated post");
                true
            }
            None => false,
        }
    }

    /// Removes the post with `id`. Unknown ids are a no-op.
    pub fn delete(&mut self, id: PostId) -> Option<Post> {
        let index = self.posts.iter().position(|post| post.id == id)?;
        debug!(id, "deleted post");
        Some(self.posts.remove(index))
    }

    /// Posts matching `term` in title, content or category, in store order.
    pub fn filter(&self, term: &str) -> Vec<&Post> {
        let needle = term.to_lowercase();
        self.posts.iter().filter(|post| post.matches(&needle)).collect()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use proptest::test_runner::Config;

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
    }

    fn form(title: &str, content: &str, category: &str) -> PostForm {
        PostForm::new(title, content, category)
    }

    #[test]
    fn creates_prepend_and_deletes_shrink() {
        let mut store = PostStore::seeded();
        let start = store.len();

        for i in 0..5 {
            store.create(form(&format!("post {i}"), "body", "React"), today());
        }
        assert_eq!(store.posts()[0].title, "post 4");

        let newest = store.posts()[0].id;
        let oldest_created = store.posts()[4].id;
        store.delete(newest);
        store.delete(oldest_created);

        assert_eq!(store.len(), start + 5 - 2);
        assert_eq!(store.posts()[0].title, "post 3");
    }

    #[test]
    fn created_post_is_stamped() {
        let mut store = PostStore::default();
        let post = store.create(form("A", "B", "Development"), today()).clone();
        assert_eq!(post.author, CURRENT_USER);
        assert_eq!(post.date, today());
        assert_eq!(post.id, 1);
    }

    #[test]
    fn ids_stay_unique_after_delete_then_create() {
        let mut store = PostStore::seeded();
        store.delete(1);
        let id = store.create(form("A", "B", "React"), today()).id;
        assert_eq!(id, 3);

        let mut ids: Vec<_> = store.posts().iter().map(|post| post.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), store.len());
    }

    #[test]
    fn update_touches_only_editable_fields() {
        let mut store = PostStore::seeded();
        let before = store.get(2).cloned().unwrap();

        assert!(store.update(2, form("New title", "New content", "JavaScript")));

        let after = store.get(2).unwrap();
        assert_eq!(after.title, "New title");
        assert_eq!(after.content, "New content");
        assert_eq!(after.category, "JavaScript");
        assert_eq!(after.id, before.id);
        assert_eq!(after.author, before.author);
        assert_eq!(after.date, before.date);
    }

    #[test]
    fn update_of_missing_id_reports_false() {
        let mut store = PostStore::seeded();
        let before = store.posts().to_vec();
        assert!(!store.update(42, form("x", "y", "React")));
        assert_eq!(store.posts(), before.as_slice());
    }

    #[test]
    fn deleting_missing_id_is_a_noop() {
        let mut store = PostStore::seeded();
        let before = store.posts().to_vec();
        assert!(store.delete(99).is_none());
        assert_eq!(store.posts(), before.as_slice());
    }

    #[test]
    fn empty_term_returns_everything_in_order() {
        let mut store = PostStore::seeded();
        store.create(form("A", "B", "Development"), today());
        let all: Vec<_> = store.filter("").into_iter().cloned().collect();
        assert_eq!(all, store.posts());
    }

    #[test]
    fn unmatched_term_returns_nothing() {
        let store = PostStore::seeded();
        assert!(store.filter("kubernetes").is_empty());
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let mut store = PostStore::seeded();
        store.create(form("A", "B", "Development"), today());

        let hits = store.filter("b");
        assert_eq!(hits[0].title, "A");

        let by_category: Vec<_> = store.filter("REACT").iter().map(|p| p.id).collect();
        assert!(by_category.contains(&2));
    }

    #[derive(Debug, Clone)]
    enum Op {
        Create,
        /// Deletes the post at this position, modulo length. Skipped on an empty store.
        Delete(usize),
        DeleteMissing,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => Just(Op::Create),
            2 => any::<usize>().prop_map(Op::Delete),
            1 => Just(Op::DeleteMissing),
        ]
    }

    proptest! {
        #![proptest_config(Config::with_cases(128))]
        #[test]
        fn any_op_sequence_keeps_length_order_and_unique_ids(
            ops in proptest::collection::vec(op(), 0..64)
        ) {
            let mut store = PostStore::seeded();
            let mut creates = 0usize;
            let mut deletes = 0usize;
            let mut latest: Option<PostId> = None;

            for op in ops {
                match op {
                    Op::Create => {
                        let id = store.create(form("t", "c", "React"), today()).id;
                        creates += 1;
                        latest = Some(id);
                    }
                    Op::Delete(index) => {
                        if store.is_empty() {
                            continue;
                        }
                        let id = store.posts()[index % store.len()].id;
                        prop_assert!(store.delete(id).is_some());
                        deletes += 1;
                        if latest == Some(id) {
                            latest = None;
                        }
                    }
                    Op::DeleteMissing => {
                        prop_assert!(store.delete(PostId::MAX).is_none());
                    }
                }

                prop_assert_eq!(store.len(), 2 + creates - deletes);
                if let Some(id) = latest {
                    prop_assert_eq!(store.posts()[0].id, id);
                }

                let mut ids: Vec<_> = store.posts().iter().map(|post| post.id).collect();
                ids.sort_unstable();
                ids.dedup();
                prop_assert_eq!(ids.len(), store.len());
            }
        }
    }
}
