//! Login credential payloads.
//!
//! `/login` carries `base64(email:password)` after the scheme word of the
//! `Authorization` header, the same payload HTTP Basic uses.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Decoded login credentials. Either half is `None` when absent or empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Encode `username:password` as base64.
pub fn encode_bearer_credentials(username: &str, password: &str) -> String {
    STANDARD.encode(format!("{username}:{password}"))
}

/// Decode a base64 `username:password` payload, splitting on the first colon.
///
/// Never fails: malformed input yields empty credentials and the caller
/// decides which fields it needs.
pub fn decode_bearer_credentials(token: &str) -> Credentials {
    let Ok(bytes) = STANDARD.decode(token.trim()) else {
        return Credentials::default();
    };
    let Ok(decoded) = String::from_utf8(bytes) else {
        return Credentials::default();
    };

    let (username, password) = match decoded.split_once(':') {
        Some((u, p)) => (u, Some(p)),
        None => (decoded.as_str(), None),
    };

    Credentials {
        username: non_empty(username),
        password: password.and_then(non_empty),
    }
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}
