//! PostgreSQL store on a shared `PgPool`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgDatabaseError;
use tracing::debug;

use super::{Store, StoreError};
use crate::models::post::{NewPost, Post};
use crate::models::user::{NewUser, User, UserWithPassword};

/// SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";
/// SQLSTATE for `foreign_key_violation`.
const FOREIGN_KEY_VIOLATION: &str = "23503";

const POST_COLUMNS: &str = "id, title, text, publish, created_at, author_id";

/// Store backed by PostgreSQL. Cloning shares the pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i32,
    name: String,
    email: String,
    password: String,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for UserWithPassword {
    fn from(row: UserRow) -> Self {
        UserWithPassword {
            user: User {
                id: row.id,
                name: row.name,
                email: row.email,
                created_at: row.created_at,
            },
            password_hash: row.password,
        }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email, password) VALUES ($1, $2, $3) \
             RETURNING id, name, email, created_at",
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(classify)
        .inspect(|u| debug!(user_id = u.id, "inserted user"))
    }

    async fn find_user_by_id(&self, id: i32) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, User>(
            "SELECT id, name, email, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn find_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserWithPassword>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, name, email, password, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(UserWithPassword::from))
    }

    async fn create_post(&self, post: NewPost) -> Result<Post, StoreError> {
        sqlx::query_as::<_, Post>(&format!(
            "INSERT INTO posts (title, text, author_id) VALUES ($1, $2, $3) \
             RETURNING {POST_COLUMNS}"
        ))
        .bind(&post.title)
        .bind(&post.text)
        .bind(post.author_id)
        .fetch_one(&self.pool)
        .await
        .map_err(classify)
        .inspect(|p| debug!(post_id = p.id, author_id = p.author_id, "inserted post"))
    }

    async fn list_posts_by_author(&self, author_id: i32) -> Result<Vec<Post>, StoreError> {
        let rows = sqlx::query_as::<_, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE author_id = $1 ORDER BY id"
        ))
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Map constraint violations to their `StoreError` variants.
fn classify(err: sqlx::Error) -> StoreError {
    let sqlx::Error::Database(db_err) = &err else {
        return StoreError::from(err);
    };
    let code = db_err.code().map(|c| c.into_owned());
    match code.as_deref() {
        Some(UNIQUE_VIOLATION) => {
            let detail = db_err
                .try_downcast_ref::<PgDatabaseError>()
                .and_then(|pg| pg.detail());
            let fields = unique_violation_fields(detail, db_err.constraint());
            debug!(?fields, "unique constraint violated");
            StoreError::UniqueViolation { fields }
        }
        Some(FOREIGN_KEY_VIOLATION) => {
            StoreError::ForeignKeyViolation(db_err.message().to_string())
        }
        _ => StoreError::from(err),
    }
}

/// Columns named by a unique violation: from the detail, else the
/// constraint name, else `record`. Never empty.
fn unique_violation_fields(detail: Option<&str>, constraint: Option<&str>) -> Vec<String> {
    detail
        .and_then(unique_fields_from_detail)
        .or_else(|| constraint.map(fields_from_constraint))
        .filter(|fields| fields.iter().any(|f| !f.is_empty()))
        .unwrap_or_else(|| vec!["record".to_string()])
}

/// Extract column names from a Postgres unique-violation detail such as
/// `Key (email)=(a@b.c) already exists.`
pub fn unique_fields_from_detail(detail: &str) -> Option<Vec<String>> {
    let rest = detail.strip_prefix("Key (")?;
    let (columns, _) = rest.split_once(")=(")?;
    let fields: Vec<String> = columns
        .split(',')
        .map(|c| c.trim().trim_matches('"').to_string())
        .filter(|c| !c.is_empty())
        .collect();
    (!fields.is_empty()).then_some(fields)
}

/// Best-effort column name from a default constraint name (`users_email_key`).
fn fields_from_constraint(constraint: &str) -> Vec<String> {
    let base = constraint.strip_suffix("_key").unwrap_or(constraint);
    let column = base.split_once('_').map_or(base, |(_, col)| col);
    vec![column.to_string()]
}
