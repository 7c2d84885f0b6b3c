//! Client-side post manager: an in-memory post list with search, a create/edit form and a
//! login/signup flow. Nothing here is synced back to the server's post collection.

pub mod api;
pub mod auth;
pub mod blog;
pub mod editor;
pub mod post;
pub mod store;

pub use api::{ApiError, AuthApi, HttpAuthApi};
pub use auth::{AuthController, AuthError, AuthForm, LoginStatus, LoginTicket, Modal};
pub use blog::{Blog, BlogView};
pub use editor::{FormError, PostEditor, Submitted};
pub use post::{Post, PostForm, PostId};
pub use store::PostStore;
