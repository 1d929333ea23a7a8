//! Product Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::ProductCategory;
use crate::error::ValidationError;
use crate::util;

/// Maximum title length (characters)
pub const MAX_TITLE_LEN: usize = 100;

/// Lowest accepted price
pub const MIN_PRICE: f64 = 0.01;

/// Highest accepted price
pub const MAX_PRICE: f64 = 999_999.99;

/// Maximum raw upload size (5MB)
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Default description language tag
pub const DEFAULT_LANGUAGE: &str = "en";

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

/// SEO metadata attached to every product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductMeta {
    #[serde(default)]
    pub seo_keywords: Vec<String>,
    #[serde(default = "default_language")]
    pub language: String,
}

impl ProductMeta {
    pub fn new(seo_keywords: Vec<String>) -> Self {
        Self {
            seo_keywords,
            language: default_language(),
        }
    }
}

impl Default for ProductMeta {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// Output of a description generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub description: String,
    pub meta: ProductMeta,
}

/// Raw image picked by the user, before normalization
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    /// MIME type reported by the picker (e.g. "image/png")
    pub mime_type: String,
    pub file_name: Option<String>,
}

impl ImageUpload {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
            file_name: None,
        }
    }

    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageUpload")
            .field("len", &self.bytes.len())
            .field("mime_type", &self.mime_type)
            .field("file_name", &self.file_name)
            .finish()
    }
}

/// Form submission a product is created from. Never persisted as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductInput {
    pub title: String,
    pub category: ProductCategory,
    pub price: f64,
    pub image: ImageUpload,
}

impl ProductInput {
    pub fn new(
        title: impl Into<String>,
        category: ProductCategory,
        price: f64,
        image: ImageUpload,
    ) -> Self {
        Self {
            title: title.into(),
            category,
            price,
            image,
        }
    }

    /// Check the form rules. The store assumes inputs already passed this.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        let title_len = self.title.chars().count();
        if title_len > MAX_TITLE_LEN {
            return Err(ValidationError::TitleTooLong {
                len: title_len,
                max: MAX_TITLE_LEN,
            });
        }
        if !(MIN_PRICE..=MAX_PRICE).contains(&self.price) {
            return Err(ValidationError::PriceOutOfRange(self.price));
        }
        if self.image.len() > MAX_IMAGE_BYTES {
            return Err(ValidationError::ImageTooLarge {
                size: self.image.len(),
                max: MAX_IMAGE_BYTES,
            });
        }
        if !self.image.mime_type.starts_with("image/") {
            return Err(ValidationError::NotAnImage(self.image.mime_type.clone()));
        }
        Ok(())
    }
}

/// Persisted listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub title: String,
    pub category: ProductCategory,
    pub price: f64,
    /// `data:` URL of the normalized image
    pub image_url: String,
    pub description: String,
    #[serde(default)]
    pub meta: ProductMeta,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Build a new product from form input; assigns id and timestamps.
    pub fn new(
        input: &ProductInput,
        image_url: String,
        description: String,
        meta: ProductMeta,
    ) -> Self {
        let now = util::now_utc();
        Self {
            id: util::new_product_id(),
            title: input.title.clone(),
            category: input.category,
            price: input.price,
            image_url,
            description,
            meta,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge the set fields of `update` and refresh `updated_at`.
    pub fn apply_update(&mut self, update: ProductUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(image_url) = update.image_url {
            self.image_url = image_url;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(meta) = update.meta {
            self.meta = meta;
        }
        // Clock skew must not break created_at <= updated_at
        self.updated_at = util::now_utc().max(self.created_at);
    }
}

/// Partial update payload; `id` and `createdAt` are immutable
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub title: Option<String>,
    pub category: Option<ProductCategory>,
    pub price: Option<f64>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub meta: Option<ProductMeta>,
}

impl ProductUpdate {
    pub fn description(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_upload() -> ImageUpload {
        ImageUpload::new(vec![0x89, b'P', b'N', b'G'], "image/png")
    }

    fn input() -> ProductInput {
        ProductInput::new(
            "Wireless Mouse",
            ProductCategory::Electronics,
            29.99,
            png_upload(),
        )
    }

    #[test]
    fn test_validate_accepts_valid_input() {
        assert_eq!(input().validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_bad_fields() {
        let mut i = input();
        i.title = "   ".to_string();
        assert_eq!(i.validate(), Err(ValidationError::EmptyTitle));

        let mut i = input();
        i.title = "x".repeat(MAX_TITLE_LEN + 1);
        assert!(matches!(
            i.validate(),
            Err(ValidationError::TitleTooLong { len: 101, .. })
        ));

        let mut i = input();
        i.price = 0.0;
        assert!(matches!(i.validate(), Err(ValidationError::PriceOutOfRange(_))));
        i.price = 1_000_000.0;
        assert!(matches!(i.validate(), Err(ValidationError::PriceOutOfRange(_))));
        i.price = f64::NAN;
        assert!(matches!(i.validate(), Err(ValidationError::PriceOutOfRange(_))));

        let mut i = input();
        i.image.mime_type = "application/pdf".to_string();
        assert!(matches!(i.validate(), Err(ValidationError::NotAnImage(_))));

        let mut i = input();
        i.image.bytes = vec![0; MAX_IMAGE_BYTES + 1];
        assert!(matches!(i.validate(), Err(ValidationError::ImageTooLarge { .. })));
    }

    #[test]
    fn test_new_product_timestamps_and_meta() {
        let p = Product::new(
            &input(),
            "data:image/jpeg;base64,AAAA".to_string(),
            "desc".to_string(),
            ProductMeta::new(vec!["wireless mouse".to_string()]),
        );
        assert_eq!(p.created_at, p.updated_at);
        assert_eq!(p.meta.language, "en");
        assert_eq!(p.title, "Wireless Mouse");
    }

    #[test]
    fn test_apply_update_merges_set_fields_only() {
        let mut p = Product::new(&input(), "img".to_string(), "old".to_string(), ProductMeta::default());
        let created = p.created_at;

        p.apply_update(ProductUpdate {
            description: Some("new".to_string()),
            price: Some(19.5),
            ..Default::default()
        });

        assert_eq!(p.description, "new");
        assert_eq!(p.price, 19.5);
        assert_eq!(p.title, "Wireless Mouse");
        assert_eq!(p.created_at, created);
        assert!(p.updated_at >= p.created_at);
    }

    #[test]
    fn test_product_json_shape() {
        let p = Product::new(&input(), "img".to_string(), "d".to_string(), ProductMeta::default());
        let value = serde_json::to_value(&p).unwrap();
        assert!(value.get("imageUrl").is_some());
        assert!(value.get("createdAt").is_some());
        assert_eq!(value["category"], "Electronics");
        assert_eq!(value["meta"]["language"], "en");

        // language falls back to "en" when missing
        let meta: ProductMeta = serde_json::from_str(r#"{"seoKeywords":["a"]}"#).unwrap();
        assert_eq!(meta.language, "en");
    }
}
