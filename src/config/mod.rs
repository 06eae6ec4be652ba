//! Configuration for the sprite locator
//!
//! Provides types and loading for the optional `locator.toml` file.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
