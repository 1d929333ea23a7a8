//! Description generator collaborator
//!
//! The store only depends on [`DescriptionGenerator`]; [`TemplateGenerator`]
//! is the stand-in used until a real text service is wired in.

mod keywords;
mod templates;

use async_trait::async_trait;
use shared::{GenerationResponse, ProductInput};
use thiserror::Error;

pub use keywords::{boilerplate_keywords, seo_keywords};
pub use templates::TemplateGenerator;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("Generator unavailable: {0}")]
    Unavailable(String),

    #[error("Generator returned an empty description")]
    EmptyDescription,

    #[error("Generator error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Produces a marketing description and SEO metadata for a product
#[async_trait]
pub trait DescriptionGenerator: Send + Sync {
    async fn generate(&self, input: &ProductInput) -> Result<GenerationResponse, GeneratorError>;
}
