//! Storage client for users and posts.
//!
//! `Store` is the seam between request handlers and persistence. The server
//! constructs one implementation at startup and shares it as
//! `Arc<dyn Store>`; tests inject [`MemoryStore`].

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::post::{NewPost, Post};
use crate::models::user::{NewUser, User, UserWithPassword};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Storage errors, classified so the API layer can map them exhaustively.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique constraint rejected the write. `fields` names the columns.
    #[error("unique constraint violated on {}", fields.join(", "))]
    UniqueViolation { fields: Vec<String> },

    /// A foreign key constraint rejected the write.
    #[error("foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),

    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),
}

/// Persistence operations used by the API.
#[async_trait]
pub trait Store: Send + Sync {
    /// Insert a user. Fails with `UniqueViolation` if the email is taken.
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError>;

    async fn find_user_by_id(&self, id: i32) -> Result<Option<User>, StoreError>;

    /// Fetch a user together with the password hash, for login.
    async fn find_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserWithPassword>, StoreError>;

    /// Insert a post. Fails with `ForeignKeyViolation` if the author is unknown.
    async fn create_post(&self, post: NewPost) -> Result<Post, StoreError>;

    /// All posts written by `author_id`, oldest first.
    async fn list_posts_by_author(&self, author_id: i32) -> Result<Vec<Post>, StoreError>;

    /// Connectivity check, run once at startup.
    async fn ping(&self) -> Result<(), StoreError>;
}
