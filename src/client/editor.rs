use chrono::NaiveDate;
use thiserror::Error;

use super::{
    post::{Post, PostForm, PostId},
    store::PostStore,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Title is required")]
    MissingTitle,
    #[error("Content is required")]
    MissingContent,
    #[error("Category is required")]
    MissingCategory,
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submitted {
    Created(PostId),
    Updated(PostId),
    /// The post being edited was deleted before the form was submitted.
    Stale(PostId),
}

/// Selection, mode and form contents of the create/edit panel.
#[derive(Debug, Clone, Default)]
pub struct PostEditor {
    current: Option<PostId>,
    editing: bool,
    form: PostForm,
}

impl PostEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<PostId> {
        self.current
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn form(&self) -> &PostForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut PostForm {
        &mut self.form
    }

    /// Switches to create mode with an empty form.
    pub fn begin_new(&mut self) {
        self.reset();
    }

    pub fn begin_edit(&mut self, post: &Post) {
        self.current = Some(post.id);
        self.editing = true;
        self.form = PostForm::from_post(post);
    }

    pub fn cancel(&mut self) {
        self.reset();
    }

    /// Applies the form to `store`: updates the selected post in edit mode, otherwise
    /// prepends a new one dated `date`. The editor is reset afterwards. On a validation
    /// error nothing changes.
    pub fn submit(
        &mut self,
        store: &mut PostStore,
        date: NaiveDate,
    ) -> Result<Submitted, FormError> {
        validate(&self.form, store)?;

        let form = std::mem::take(&mut self.form);
        let outcome = match (self.editing, self.current) {
            (true, Some(id)) => {
                if store.update(id, form) {
                    Submitted::Updated(id)
                } else {
                    Submitted::Stale(id)
                }
            }
            _ => Submitted::Created(store.create(form, date).id),
        };

        self.reset();
        Ok(outcome)
    }

    fn reset(&mut self) {
        self.current = None;
        self.editing = false;
        self.form = PostForm::default();
    }
}

fn validate(form: &PostForm, store: &PostStore) -> Result<(), FormError> {
    if form.title.trim().is_empty() {
        return Err(FormError::MissingTitle);
    }
    if form.content.trim().is_empty() {
        return Err(FormError::MissingContent);
    }
    if form.category.trim().is_empty() {
        return Err(FormError::MissingCategory);
    }
    if !store.has_category(&form.category) {
        return Err(FormError::UnknownCategory(form.category.clone()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
    }

    #[test]
    fn submit_in_create_mode_prepends_and_resets() {
        let mut store = PostStore::seeded();
        let mut editor = PostEditor::new();
        *editor.form_mut() = PostForm::new("A", "B", "Development");

        let outcome = editor.submit(&mut store, today()).unwrap();

        assert_eq!(outcome, Submitted::Created(3));
        assert_eq!(store.posts()[0].title, "A");
        assert_eq!(editor.form(), &PostForm::default());
        assert!(!editor.is_editing());
        assert_eq!(editor.current(), None);
    }

    #[test]
    fn edit_round_trip_preserves_identity() {
        let mut store = PostStore::seeded();
        let mut editor = PostEditor::new();
        let original = store.get(1).cloned().unwrap();

        editor.begin_edit(&original);
        assert!(editor.is_editing());
        assert_eq!(editor.form().title, original.title);

        editor.form_mut().title = "Retitled".to_string();
        assert_eq!(editor.submit(&mut store, today()), Ok(Submitted::Updated(1)));

        let edited = store.get(1).unwrap();
        assert_eq!(edited.title, "Retitled");
        assert_eq!(edited.date, original.date);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn editing_a_deleted_post_is_stale() {
        let mut store = PostStore::seeded();
        let mut editor = PostEditor::new();
        let post = store.get(2).cloned().unwrap();

        editor.begin_edit(&post);
        store.delete(2);

        assert_eq!(editor.submit(&mut store, today()), Ok(Submitted::Stale(2)));
        assert_eq!(store.len(), 1);
        assert!(!editor.is_editing());
    }

    #[test]
    fn required_fields_are_checked_before_anything_changes() {
        let mut store = PostStore::seeded();
        let mut editor = PostEditor::new();
        *editor.form_mut() = PostForm::new("Title", "  ", "React");

        assert_eq!(
            editor.submit(&mut store, today()),
            Err(FormError::MissingContent)
        );
        assert_eq!(store.len(), 2);
        assert_eq!(editor.form().title, "Title");

        *editor.form_mut() = PostForm::new("Title", "Body", "Rust");
        assert_eq!(
            editor.submit(&mut store, today()),
            Err(FormError::UnknownCategory("Rust".to_string()))
        );
    }

    #[test]
    fn cancel_clears_selection_mode_and_form() {
        let store = PostStore::seeded();
        let mut editor = PostEditor::new();
        editor.begin_edit(store.get(1).unwrap());
        editor.cancel();

        assert_eq!(editor.current(), None);
        assert!(!editor.is_editing());
        assert_eq!(editor.form(), &PostForm::default());
    }
}
