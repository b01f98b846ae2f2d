//! Post domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A blog post owned by exactly one author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub text: String,
    pub publish: bool,
    pub created_at: DateTime<Utc>,
    pub author_id: i32,
}

/// Fields needed to insert a post. `publish` is left to the storage default.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub author_id: i32,
    pub title: String,
    pub text: String,
}
