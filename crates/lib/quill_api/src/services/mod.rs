//! Business logic invoked by handlers.

pub mod auth;
pub mod cookies;
pub mod posts;
