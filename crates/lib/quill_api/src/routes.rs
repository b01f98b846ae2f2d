//! Route paths.

pub const USERS: &str = "/users";
pub const LOGIN: &str = "/login";
pub const ME: &str = "/me";
pub const USER_BY_ID: &str = "/users/{id}";
pub const POSTS: &str = "/posts";
