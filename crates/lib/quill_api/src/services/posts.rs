//! Post service.

use quill_core::models::post::{NewPost, Post};
use quill_core::store::Store;
use tracing::debug;

use crate::error::{AppError, AppResult};

/// Create a post owned by `author_id`. Title and text must be non-empty.
pub async fn create_post(
    store: &dyn Store,
    author_id: i32,
    title: Option<String>,
    text: Option<String>,
) -> AppResult<Post> {
    let (Some(title), Some(text)) = (
        title.filter(|s| !s.is_empty()),
        text.filter(|s| !s.is_empty()),
    ) else {
        return Err(AppError::Validation("Title and text are required".into()));
    };

    let post = store
        .create_post(NewPost {
            author_id,
            title,
            text,
        })
        .await?;
    debug!(post_id = post.id, author_id, "post created");
    Ok(post)
}

/// All posts written by `author_id`.
pub async fn list_posts(store: &dyn Store, author_id: i32) -> AppResult<Vec<Post>> {
    Ok(store.list_posts_by_author(author_id).await?)
}
