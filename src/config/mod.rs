//! Configuration module for huepick
//!
//! Provides types and parsing for `huepick.toml` picker configuration.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
