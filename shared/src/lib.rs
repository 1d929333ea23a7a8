//! Shared types for the listing workspace
//!
//! Domain model used by the store and by any presentation layer built on
//! top of it: products, the form input they are created from, the category
//! catalog and input validation.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::ValidationError;
pub use models::{
    GenerationResponse, ImageUpload, Product, ProductCategory, ProductInput, ProductMeta,
    ProductUpdate,
};
pub use serde::{Deserialize, Serialize};
