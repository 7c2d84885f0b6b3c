use chrono::{NaiveDate, Utc};

use super::{
    api::AuthApi,
    auth::{AuthController, AuthError},
    editor::{FormError, PostEditor, Submitted},
    post::{Post, PostId},
    store::PostStore,
};

pub const NO_POSTS_MESSAGE: &str = "No posts found.";
pub const CREATE_PROMPT: &str = " Create a new post to get started!";

/// Everything the blog page renders from, derived fresh on each call to [`Blog::view`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogView {
    pub posts: Vec<Post>,
    /// New post, logout, edit and delete controls.
    pub show_controls: bool,
    pub show_form: bool,
    pub form_heading: &'static str,
    pub submit_label: &'static str,
    pub empty_message: Option<String>,
}

/// The page's state: posts, the editor, the search box and the auth flow.
#[derive(Debug, Clone)]
pub struct Blog {
    pub store: PostStore,
    pub editor: PostEditor,
    pub auth: AuthController,
    search: String,
}

impl Default for Blog {
    fn default() -> Self {
        Self::new(PostStore::seeded())
    }
}

impl Blog {
    pub fn new(store: PostStore) -> Self {
        Self {
            store,
            editor: PostEditor::new(),
            auth: AuthController::new(),
            search: String::new(),
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn visible_posts(&self) -> Vec<&Post> {
        self.store.filter(&self.search)
    }

    pub fn new_post(&mut self) {
        self.editor.begin_new();
    }

    /// Loads the post into the editor. Returns `false` for an unknown id.
    pub fn edit(&mut self, id: PostId) -> bool {
        match self.store.get(id) {
            Some(post) => {
                self.editor.begin_edit(post);
                true
            }
            None => false,
        }
    }

    pub fn delete(&mut self, id: PostId) -> Option<Post> {
        self.store.delete(id)
    }

    pub fn submit_post(&mut self) -> Result<Submitted, FormError> {
        self.submit_post_on(Utc::now().date_naive())
    }

    pub fn submit_post_on(&mut self, date: NaiveDate) -> Result<Submitted, FormError> {
        self.editor.submit(&mut self.store, date)
    }

    pub async fn submit_auth<A: AuthApi + ?Sized>(&mut self, api: &A) -> Result<(), AuthError> {
        self.auth.submit(api).await
    }

    pub fn view(&self) -> BlogView {
        let logged_in = self.auth.is_logged_in();
        let posts: Vec<Post> = self.visible_posts().into_iter().cloned().collect();
        let editing = self.editor.is_editing();

        let empty_message = posts.is_empty().then(|| {
            if logged_in {
                format!("{NO_POSTS_MESSAGE}{CREATE_PROMPT}")
            } else {
                NO_POSTS_MESSAGE.to_string()
            }
        });

        BlogView {
            posts,
            show_controls: logged_in,
            show_form: logged_in && (editing || self.editor.current().is_none()),
            form_heading: if editing { "Edit Post" } else { "Create New Post" },
            submit_label: if editing { "Update Post" } else { "Create Post" },
            empty_message,
        }
    }
}
