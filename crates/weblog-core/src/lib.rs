//! # Weblog Core
//!
//! Core library for Weblog - a small content site (posts, image gallery,
//! contact form) backed by newline-delimited JSON text files instead of a
//! database.
//!
//! This crate provides the record store layer and the authentication routines
//! built on top of it, independent of any presentation surface.
//!
//! ## Architecture
//!
//! - **codec**: one-line record encoding/decoding, tolerant of corruption
//! - **table**: the file-backed append/scan/rewrite primitive
//! - **model**: typed entity records (users, posts, gallery, contact)
//! - **repo**: typed repositories over one table each
//! - **auth**: password hashing, session issuance, remember-me tokens
//! - **query**: shared sorting and pagination helpers
//! - **store**: facade bundling the repositories over one data directory

pub mod auth;
pub mod codec;
pub mod error;
pub mod model;
pub mod query;
pub mod repo;
pub mod store;
pub mod table;

pub use error::{Result, StoreError};
pub use store::Store;

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
