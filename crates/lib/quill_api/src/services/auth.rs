//! Authentication service — registration, login and user lookup.

use quill_core::auth::basic::decode_bearer_credentials;
use quill_core::auth::{jwt, password};
use quill_core::models::user::{NewUser, User};
use quill_core::store::Store;
use tracing::{info, warn};

use crate::error::{AppError, AppResult};

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user_id: i32,
    pub token: String,
}

// ---------------------------------------------------------------------------
// Password hashing (bcrypt on the blocking pool)
// ---------------------------------------------------------------------------

/// Hash a password without stalling the async runtime.
pub async fn hash_password(plaintext: String) -> AppResult<String> {
    let hash = tokio::task::spawn_blocking(move || password::hash_password(&plaintext))
        .await
        .map_err(|e| AppError::Internal(format!("hash task: {e}")))??;
    Ok(hash)
}

/// Compare a password against a stored hash on the blocking pool.
pub async fn check_password(plaintext: String, hash: String) -> AppResult<bool> {
    let ok = tokio::task::spawn_blocking(move || password::check_password(&plaintext, &hash))
        .await
        .map_err(|e| AppError::Internal(format!("verify task: {e}")))??;
    Ok(ok)
}

// ---------------------------------------------------------------------------
// Public auth operations
// ---------------------------------------------------------------------------

/// Register a new user. All fields must be present and non-empty.
pub async fn register(
    store: &dyn Store,
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> AppResult<User> {
    let (Some(name), Some(email), Some(password)) = (
        name.filter(|s| !s.is_empty()),
        email.filter(|s| !s.is_empty()),
        password.filter(|s| !s.is_empty()),
    ) else {
        return Err(AppError::Validation(
            "Name, email and password are required".into(),
        ));
    };

    let password_hash = hash_password(password).await?;
    let user = store
        .create_user(NewUser {
            name,
            email,
            password_hash,
        })
        .await?;

    info!(user_id = user.id, "user registered");
    Ok(user)
}

/// Authenticate from an `Authorization: <scheme> <base64(email:password)>` header.
///
/// The scheme word is not checked; only the payload after it is used.
pub async fn login(
    store: &dyn Store,
    authorization: Option<&str>,
    secret: &[u8],
) -> AppResult<LoginOutcome> {
    let payload = authorization
        .and_then(|h| h.split(' ').nth(1))
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::Validation("Authorization header is required".into()))?;

    let credentials = decode_bearer_credentials(payload);
    let (Some(email), Some(password)) = (credentials.username, credentials.password) else {
        return Err(AppError::Validation(
            "Email and password are required".into(),
        ));
    };

    let user = store
        .find_user_by_email(&email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    if !check_password(password, user.password_hash).await? {
        warn!(user_id = user.user.id, "login rejected: invalid password");
        return Err(AppError::Unauthorized("Invalid password".into()));
    }

    let token = jwt::generate_token(user.user.id, secret)?;
    info!(user_id = user.user.id, "user logged in");

    Ok(LoginOutcome {
        user_id: user.user.id,
        token,
    })
}

/// Look up a user by the raw `id` path segment.
pub async fn get_user(store: &dyn Store, id: &str) -> AppResult<User> {
    let id = id.trim();
    if id.is_empty() {
        return Err(AppError::Validation("Id is required".into()));
    }
    let id: i32 = id
        .parse()
        .map_err(|_| AppError::Validation("Id must be a number".into()))?;

    store
        .find_user_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))
}
