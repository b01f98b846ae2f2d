//! Request handlers.

pub mod posts;
pub mod users;
