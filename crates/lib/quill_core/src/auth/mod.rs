//! Authentication logic.
//!
//! Provides password hashing, login credential decoding and JWT management
//! shared by `quill_api` handlers and middleware.

pub mod basic;
pub mod jwt;
pub mod password;

use thiserror::Error;

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    TokenError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
