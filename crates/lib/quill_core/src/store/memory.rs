//! In-process store backed by a `RwLock`.
//!
//! Enforces the same constraints as the Postgres schema: unique emails and
//! posts referencing an existing author. Ids are assigned sequentially
//! starting at 1.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use super::{Store, StoreError};
use crate::models::post::{NewPost, Post};
use crate::models::user::{NewUser, User, UserWithPassword};

#[derive(Default)]
struct Tables {
    users: Vec<UserWithPassword>,
    posts: Vec<Post>,
}

/// Volatile storage for tests and `--in-memory` runs.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.user.email == user.email) {
            return Err(StoreError::UniqueViolation {
                fields: vec!["email".to_string()],
            });
        }
        let created = User {
            id: next_id(tables.users.iter().map(|u| u.user.id)),
            name: user.name,
            email: user.email,
            created_at: Utc::now(),
        };
        tables.users.push(UserWithPassword {
            user: created.clone(),
            password_hash: user.password_hash,
        });
        debug!(user_id = created.id, "inserted user");
        Ok(created)
    }

    async fn find_user_by_id(&self, id: i32) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|u| u.user.id == id)
            .map(|u| u.user.clone()))
    }

    async fn find_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserWithPassword>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.user.email == email).cloned())
    }

    async fn create_post(&self, post: NewPost) -> Result<Post, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.users.iter().any(|u| u.user.id == post.author_id) {
            return Err(StoreError::ForeignKeyViolation(format!(
                "author {} does not exist",
                post.author_id
            )));
        }
        let created = Post {
            id: next_id(tables.posts.iter().map(|p| p.id)),
            title: post.title,
            text: post.text,
            publish: false,
            created_at: Utc::now(),
            author_id: post.author_id,
        };
        tables.posts.push(created.clone());
        debug!(post_id = created.id, author_id = created.author_id, "inserted post");
        Ok(created)
    }

    async fn list_posts_by_author(&self, author_id: i32) -> Result<Vec<Post>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .posts
            .iter()
            .filter(|p| p.author_id == author_id)
            .cloned()
            .collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

fn next_id(ids: impl Iterator<Item = i32>) -> i32 {
    ids.max().unwrap_or(0) + 1
}
