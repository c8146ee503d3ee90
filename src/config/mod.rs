//! Configuration module for icon conversion
//!
//! Provides types, discovery and loading for `iconseq.toml`.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
