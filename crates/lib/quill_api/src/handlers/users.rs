//! User and login request handlers.

use axum::extract::{Path, State};
use axum::http::header::{AUTHORIZATION, SET_COOKIE};
use axum::http::{HeaderMap, HeaderName, StatusCode};
use axum::response::AppendHeaders;
use axum::{Extension, Json};
use axum_extra::extract::WithRejection;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{CreateUserRequest, UserResponse};
use crate::services::{auth, cookies};

/// `POST /users` — create a new user account.
pub async fn create_user_handler(
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<CreateUserRequest>, AppError>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user =
        auth::register(state.store.as_ref(), body.name, body.email, body.password).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// `GET /login` — exchange `email:password` for an auth cookie.
pub async fn login_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<(AppendHeaders<[(HeaderName, String); 1]>, Json<i32>)> {
    let authorization = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    let outcome = auth::login(state.store.as_ref(), authorization, state.config.secret()).await?;
    Ok((
        AppendHeaders([(SET_COOKIE, cookies::set_cookie_value(&outcome.token))]),
        Json(outcome.user_id),
    ))
}

/// `GET /users/{id}` — fetch a user's public profile.
pub async fn get_user_handler(
    State(state): State<AppState>,
    Extension(_user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> AppResult<Json<UserResponse>> {
    let user = auth::get_user(state.store.as_ref(), &id).await?;
    Ok(Json(user.into()))
}

/// `GET /me` — the authenticated user's id.
pub async fn me_handler(Extension(user): Extension<AuthenticatedUser>) -> Json<i32> {
    Json(user.0)
}
