//! Authentication middleware — cookie bearer token extraction and JWT verification.

use axum::{
    extract::{Request, State},
    http::header::COOKIE,
    middleware::Next,
    response::Response,
};
use quill_core::auth::jwt::check_token;
use tracing::debug;

use crate::AppState;
use crate::error::AppError;
use crate::services::cookies::AUTH_COOKIE;

/// Authenticated user id, stored in request extensions by [`require_auth`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(pub i32);

/// Axum middleware: reads `Cookie: AUTHORIZATION=BEARER <token>`, verifies the
/// JWT and injects `AuthenticatedUser` into request extensions.
///
/// Trust rests on the token signature alone; the user is not looked up.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let cookies = request
        .headers()
        .get(COOKIE)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Authorization header/cookie is required".into()))?;

    let token = bearer_token_from_cookies(cookies)
        .ok_or_else(|| AppError::Unauthorized("Missing token in headers".into()))?;

    let claims = check_token(token, state.config.secret()).inspect_err(|e| {
        debug!(error = %e, "rejected bearer token");
    })?;

    request
        .extensions_mut()
        .insert(AuthenticatedUser(claims.user_id));

    Ok(next.run(request).await)
}

/// Find the `AUTHORIZATION` cookie and return the segment after its scheme word.
pub fn bearer_token_from_cookies(cookies: &str) -> Option<&str> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| name.trim() == AUTH_COOKIE)
        .and_then(|(_, value)| value.trim().trim_matches('"').split(' ').nth(1))
        .filter(|token| !token.is_empty())
}
