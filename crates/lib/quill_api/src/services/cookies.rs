//! Cookie service — builds the auth cookie issued at login.

use axum_extra::extract::cookie::{Cookie, SameSite};
use quill_core::auth::jwt::TOKEN_EXPIRY_SECS;
use time::Duration;

/// Cookie name carrying the bearer token.
pub const AUTH_COOKIE: &str = "AUTHORIZATION";

/// Scheme word preceding the token in the cookie value.
pub const BEARER_SCHEME: &str = "BEARER";

/// Build the `AUTHORIZATION=BEARER <token>` cookie, living as long as the token.
pub fn auth_cookie(token: &str) -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE.to_string(), format!("{BEARER_SCHEME} {token}")))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/".to_string())
        .max_age(Duration::seconds(TOKEN_EXPIRY_SECS))
        .build()
}

/// `Set-Cookie` value for the auth cookie, unencoded.
///
/// `CookieJar` percent-encodes values, which would turn the space after
/// `BEARER` into `%20`; the raw `Display` form keeps it.
pub fn set_cookie_value(token: &str) -> String {
    auth_cookie(token).to_string()
}
