//! Integration tests — build the router over an in-memory store and drive it
//! with `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use quill_api::{AppState, config::ApiConfig};
use quill_core::auth::basic::encode_bearer_credentials;
use quill_core::auth::jwt::{TOKEN_EXPIRY_SECS, generate_token};
use quill_core::models::auth::TokenClaims;
use quill_core::store::MemoryStore;
use serde_json::{Value, json};
use tower::ServiceExt;

const SECRET: &str = "test-secret";

fn app() -> Router {
    let config = ApiConfig::new("127.0.0.1:0", SECRET).expect("config");
    quill_api::router(AppState::new(Arc::new(MemoryStore::new()), config))
}

fn auth_cookie(user_id: i32) -> String {
    let token = generate_token(user_id, SECRET.as_bytes()).expect("token");
    format!("AUTHORIZATION=BEARER {token}")
}

/// Cookie carrying a correctly signed token whose `exp` passed `secs_ago` seconds ago.
fn expired_auth_cookie(user_id: i32, secs_ago: i64) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = TokenClaims {
        user_id,
        iat: now - TOKEN_EXPIRY_SECS - secs_ago,
        exp: now - secs_ago,
    };
    let token = jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .expect("token");
    format!("AUTHORIZATION=BEARER {token}")
}

fn post_json(uri: &str, body: Value, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn login_request(email: &str, password: &str) -> Request<Body> {
    Request::builder()
        .uri("/login")
        .header(
            header::AUTHORIZATION,
            format!("Basic {}", encode_bearer_credentials(email, password)),
        )
        .body(Body::empty())
        .unwrap()
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.expect("request");
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("parse JSON")
    };
    (status, json)
}

async fn register(app: &Router, name: &str, email: &str, password: &str) -> Value {
    let (status, body) = send(
        app,
        post_json(
            "/users",
            json!({ "name": name, "email": email, "password": password }),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
    body
}

// ---------------------------------------------------------------------------
// POST /users
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_user_returns_public_fields_only() {
    let app = app();
    let body = register(&app, "test", "test@example.com", "test").await;

    assert_eq!(body["id"], 1);
    assert_eq!(body["name"], "test");
    assert!(body["createdAt"].is_string());
    assert!(body.get("password").is_none());
    assert!(body.get("email").is_none());
}

#[tokio::test]
async fn create_user_requires_all_fields() {
    let app = app();
    let (status, body) = send(
        &app,
        post_json("/users", json!({ "name": "test", "email": "test" }), None),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Name, email and password are required" }));
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let app = app();
    register(&app, "first", "dup@example.com", "pw").await;

    let (status, body) = send(
        &app,
        post_json(
            "/users",
            json!({ "name": "second", "email": "dup@example.com", "password": "pw" }),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "email already exists" }));
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let app = app();
    let req = Request::builder()
        .method("POST")
        .uri("/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

// ---------------------------------------------------------------------------
// GET /login
// ---------------------------------------------------------------------------

#[tokio::test]
async fn login_sets_auth_cookie_usable_on_protected_routes() {
    let app = app();
    register(&app, "ann", "ann@example.com", "secret").await;

    let resp = app
        .clone()
        .oneshot(login_request("ann@example.com", "secret"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let set_cookie = resp
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .expect("set-cookie header")
        .to_string();
    assert!(set_cookie.starts_with("AUTHORIZATION=BEARER "), "{set_cookie}");
    assert!(!set_cookie.contains("%20"), "{set_cookie}");
    assert!(set_cookie.contains("Max-Age=90000"), "{set_cookie}");

    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"1");

    let cookie = set_cookie.split(';').next().unwrap();
    let (status, body) = send(&app, get("/me", Some(cookie))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(1));
}

#[tokio::test]
async fn login_with_wrong_password_fails() {
    let app = app();
    register(&app, "ann", "ann@example.com", "secret").await;

    let (status, body) = send(&app, login_request("ann@example.com", "wrong")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid password" }));
}

#[tokio::test]
async fn login_with_unknown_email_fails() {
    let app = app();
    let (status, body) = send(&app, login_request("nobody@example.com", "pw")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "User not found" }));
}

#[tokio::test]
async fn login_requires_header_and_both_credentials() {
    let app = app();

    let (status, body) = send(&app, get("/login", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Authorization header is required" }));

    let (status, body) = send(&app, login_request("ann@example.com", "")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Email and password are required" }));
}

// ---------------------------------------------------------------------------
// Auth middleware
// ---------------------------------------------------------------------------

#[tokio::test]
async fn protected_route_without_cookie_fails() {
    let app = app();
    let (status, body) = send(&app, get("/me", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Authorization header/cookie is required" }));
}

#[tokio::test]
async fn cookie_without_token_fails() {
    let app = app();
    let (status, body) = send(&app, get("/me", Some("AUTHORIZATION=BEARER"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Missing token in headers" }));
}

#[tokio::test]
async fn tampered_token_fails() {
    let app = app();
    let cookie = format!("{}123", auth_cookie(1));
    let (status, body) = send(&app, get("/me", Some(cookie.as_str()))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn token_just_past_expiry_is_rejected() {
    let app = app();
    let cookie = expired_auth_cookie(1, 30);
    let (status, body) = send(&app, get("/me", Some(cookie.as_str()))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "jwt expired" }));
}

#[tokio::test]
async fn cookie_from_login_header_round_trips_alongside_other_cookies() {
    let app = app();
    register(&app, "ann", "ann@example.com", "secret").await;

    let resp = app
        .clone()
        .oneshot(login_request("ann@example.com", "secret"))
        .await
        .unwrap();
    let pair = resp
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .expect("auth cookie pair")
        .to_string();

    let cookie = format!("theme=dark; {pair}; lang=en");
    let (status, body) = send(&app, get("/posts", Some(cookie.as_str()))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn valid_token_identifies_the_user() {
    let app = app();
    let (status, body) = send(&app, get("/me", Some(auth_cookie(42).as_str()))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(42));
}

// ---------------------------------------------------------------------------
// GET /users/{id}
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_user_by_id() {
    let app = app();
    register(&app, "ann", "ann@example.com", "pw").await;
    let cookie = auth_cookie(1);

    let (status, body) = send(&app, get("/users/1", Some(cookie.as_str()))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);
    assert_eq!(body["name"], "ann");
    assert!(body["createdAt"].is_string());
    assert!(body.get("password").is_none());

    let (status, body) = send(&app, get("/users/99", Some(cookie.as_str()))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "User not found" }));

    let (status, body) = send(&app, get("/users/abc", Some(cookie.as_str()))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Id must be a number" }));
}

#[tokio::test]
async fn get_user_requires_auth() {
    let app = app();
    let (status, _) = send(&app, get("/users/1", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// /posts
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_post_defaults_to_unpublished() {
    let app = app();
    register(&app, "ann", "ann@example.com", "pw").await;

    let (status, body) = send(
        &app,
        post_json(
            "/posts",
            json!({ "title": "test", "text": "test" }),
            Some(auth_cookie(1).as_str()),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["id"].is_number());
    assert_eq!(body["title"], "test");
    assert_eq!(body["text"], "test");
    assert_eq!(body["publish"], false);
    assert_eq!(body["authorId"], 1);
    assert!(body["createdAt"].is_string());
}

#[tokio::test]
async fn create_post_requires_title_and_text() {
    let app = app();
    register(&app, "ann", "ann@example.com", "pw").await;

    let (status, body) = send(
        &app,
        post_json("/posts", json!({ "title": "only" }), Some(auth_cookie(1).as_str())),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Title and text are required" }));
}

#[tokio::test]
async fn create_post_for_unknown_author_fails() {
    let app = app();
    let (status, body) = send(
        &app,
        post_json(
            "/posts",
            json!({ "title": "t", "text": "x" }),
            Some(auth_cookie(7).as_str()),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Author not found" }));
}

#[tokio::test]
async fn list_posts_returns_only_own_posts() {
    let app = app();
    register(&app, "ann", "ann@example.com", "pw").await;
    register(&app, "bob", "bob@example.com", "pw").await;
    let ann = auth_cookie(1);
    let bob = auth_cookie(2);

    for (cookie, title) in [(&ann, "a1"), (&bob, "b1"), (&ann, "a2")] {
        let (status, _) = send(
            &app,
            post_json(
                "/posts",
                json!({ "title": title, "text": "body" }),
                Some(cookie.as_str()),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&app, get("/posts", Some(ann.as_str()))).await;
    assert_eq!(status, StatusCode::OK);
    let posts = body.as_array().expect("array");
    let titles: Vec<&str> = posts.iter().map(|p| p["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["a1", "a2"]);
    assert!(posts.iter().all(|p| p["authorId"] == 1));

    let (_, body) = send(&app, get("/posts", Some(bob.as_str()))).await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn list_posts_requires_auth() {
    let app = app();
    let (status, body) = send(&app, get("/posts", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Authorization header/cookie is required" }));
}
