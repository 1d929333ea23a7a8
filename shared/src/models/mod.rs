//! Data models
//!
//! Serialized with camelCase keys, matching the persisted snapshot layout.

pub mod category;
pub mod product;

// Re-exports
pub use category::*;
pub use product::*;
