//! Configuration for the upscaler
//!
//! Provides types and loading for the `anime4k.toml` configuration file.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
