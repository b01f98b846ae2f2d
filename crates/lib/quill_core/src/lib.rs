//! # quill_core
//!
//! Core domain logic for Quill: credentials, domain models and storage.

pub mod auth;
pub mod migrate;
pub mod models;
pub mod store;
