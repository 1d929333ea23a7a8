//! Product Category Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed category catalog offered by the listing form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductCategory {
    Electronics,
    Clothing,
    #[serde(rename = "Home & Garden")]
    HomeAndGarden,
    #[serde(rename = "Sports & Outdoors")]
    SportsAndOutdoors,
    #[serde(rename = "Books & Media")]
    BooksAndMedia,
    #[serde(rename = "Beauty & Health")]
    BeautyAndHealth,
    #[serde(rename = "Toys & Games")]
    ToysAndGames,
    Automotive,
    #[serde(rename = "Food & Beverages")]
    FoodAndBeverages,
    Other,
}

impl ProductCategory {
    /// All categories in display order
    pub const ALL: [ProductCategory; 10] = [
        ProductCategory::Electronics,
        ProductCategory::Clothing,
        ProductCategory::HomeAndGarden,
        ProductCategory::SportsAndOutdoors,
        ProductCategory::BooksAndMedia,
        ProductCategory::BeautyAndHealth,
        ProductCategory::ToysAndGames,
        ProductCategory::Automotive,
        ProductCategory::FoodAndBeverages,
        ProductCategory::Other,
    ];

    /// Display label, identical to the serialized form
    pub fn label(&self) -> &'static str {
        match self {
            ProductCategory::Electronics => "Electronics",
            ProductCategory::Clothing => "Clothing",
            ProductCategory::HomeAndGarden => "Home & Garden",
            ProductCategory::SportsAndOutdoors => "Sports & Outdoors",
            ProductCategory::BooksAndMedia => "Books & Media",
            ProductCategory::BeautyAndHealth => "Beauty & Health",
            ProductCategory::ToysAndGames => "Toys & Games",
            ProductCategory::Automotive => "Automotive",
            ProductCategory::FoodAndBeverages => "Food & Beverages",
            ProductCategory::Other => "Other",
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Error returned when parsing an unknown category label
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown product category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for ProductCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProductCategory::ALL
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_parse_roundtrip() {
        for category in ProductCategory::ALL {
            assert_eq!(category.label().parse::<ProductCategory>(), Ok(category));
        }
        assert!("Garden".parse::<ProductCategory>().is_err());
    }

    #[test]
    fn test_serializes_as_label() {
        let json = serde_json::to_string(&ProductCategory::HomeAndGarden).unwrap();
        assert_eq!(json, "\"Home & Garden\"");

        let parsed: ProductCategory = serde_json::from_str("\"Food & Beverages\"").unwrap();
        assert_eq!(parsed, ProductCategory::FoodAndBeverages);
    }
}
