use shared::{ProductCategory, ProductInput};

/// Marketing terms every listing carries
const BOILERPLATE: [&str; 3] = ["premium quality", "best value", "top rated"];

fn category_keywords(category: ProductCategory) -> [&'static str; 4] {
    match category {
        ProductCategory::Electronics => ["tech", "gadget", "electronic device", "smart technology"],
        ProductCategory::Clothing => ["fashion", "apparel", "style", "clothing"],
        ProductCategory::HomeAndGarden => ["home decor", "garden", "household", "interior"],
        ProductCategory::SportsAndOutdoors => ["sports", "outdoor", "fitness", "athletic"],
        ProductCategory::BooksAndMedia => ["book", "media", "entertainment", "education"],
        ProductCategory::BeautyAndHealth => ["beauty", "health", "wellness", "self-care"],
        ProductCategory::ToysAndGames => ["toy", "game", "entertainment", "children"],
        ProductCategory::Automotive => ["car", "automotive", "vehicle", "auto"],
        ProductCategory::FoodAndBeverages => ["food", "beverage", "gourmet", "culinary"],
        ProductCategory::Other => ["product", "item", "accessory", "essential"],
    }
}

fn price_keywords(price: f64) -> &'static [&'static str] {
    if price < 50.0 {
        &["budget friendly", "affordable"]
    } else if price < 200.0 {
        &["mid-range", "value"]
    } else {
        &["premium", "luxury", "high-end"]
    }
}

/// Title, category and the fixed marketing terms.
///
/// Used directly when the user supplies the description themselves.
pub fn boilerplate_keywords(title: &str, category: ProductCategory) -> Vec<String> {
    let mut keywords = vec![title.to_lowercase(), category.label().to_lowercase()];
    keywords.extend(BOILERPLATE.iter().map(|k| k.to_string()));
    keywords
}

/// Full keyword set: boilerplate, category terms, then a price tier.
pub fn seo_keywords(input: &ProductInput) -> Vec<String> {
    let mut keywords = boilerplate_keywords(&input.title, input.category);
    keywords.extend(category_keywords(input.category).iter().map(|k| k.to_string()));
    keywords.extend(price_keywords(input.price).iter().map(|k| k.to_string()));
    keywords
}
