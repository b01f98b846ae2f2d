//! Post request handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use axum_extra::extract::WithRejection;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{CreatePostRequest, PostResponse};
use crate::services::posts;

/// `POST /posts` — create a post owned by the authenticated user.
pub async fn create_post_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    WithRejection(Json(body), _): WithRejection<Json<CreatePostRequest>, AppError>,
) -> AppResult<(StatusCode, Json<PostResponse>)> {
    let post = posts::create_post(state.store.as_ref(), user.0, body.title, body.text).await?;
    Ok((StatusCode::CREATED, Json(post.into())))
}

/// `GET /posts` — list the authenticated user's posts.
pub async fn list_posts_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> AppResult<Json<Vec<PostResponse>>> {
    let posts = posts::list_posts(state.store.as_ref(), user.0).await?;
    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}
