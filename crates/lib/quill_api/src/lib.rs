//! # quill_api
//!
//! HTTP API library for Quill.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use quill_core::store::Store;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::handlers::{posts, users};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Storage client, opened once by the server.
    pub store: Arc<dyn Store>,
    /// API configuration.
    pub config: ApiConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, config: ApiConfig) -> Self {
        Self { store, config }
    }
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public routes (no auth required)
    let public = Router::new()
        .route(routes::USERS, post(users::create_user_handler))
        .route(routes::LOGIN, get(users::login_handler));

    // Protected routes (require auth cookie)
    let protected = Router::new()
        .route(routes::ME, get(users::me_handler))
        .route(routes::USER_BY_ID, get(users::get_user_handler))
        .route(
            routes::POSTS,
            get(posts::list_posts_handler).post(posts::create_post_handler),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
