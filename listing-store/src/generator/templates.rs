use std::ops::RangeInclusive;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use shared::{GenerationResponse, ProductCategory, ProductInput, ProductMeta};

use super::keywords::seo_keywords;
use super::{DescriptionGenerator, GeneratorError};

const TITLE_PLACEHOLDER: &str = "{title}";

fn templates(category: ProductCategory) -> [&'static str; 3] {
    match category {
        ProductCategory::Electronics => [
            "Experience cutting-edge technology with the {title}. This premium electronic device combines innovation with reliability, perfect for tech enthusiasts and professionals alike. Features advanced functionality and sleek design for modern lifestyles.",
            "Discover the future of electronics with the {title}. Packed with advanced features and sophisticated engineering, it delivers exceptional performance and user experience. Built to last with premium materials and cutting-edge technology.",
            "Upgrade your tech game with the {title}. This high-performance electronic device offers seamless integration, intuitive controls, and stunning visuals. Perfect for both work and entertainment needs.",
        ],
        ProductCategory::Clothing => [
            "Elevate your style with the {title}. Crafted from premium materials with meticulous attention to detail, this piece offers both comfort and sophistication. Designed for the modern individual who values quality and fashion.",
            "Make a statement with the {title}. This carefully designed garment combines contemporary aesthetics with practical functionality. Perfect for various occasions, from casual outings to formal events.",
            "Experience luxury and comfort with the {title}. Made from high-quality fabrics and featuring expert craftsmanship, this piece ensures you look and feel your best in any setting.",
        ],
        ProductCategory::HomeAndGarden => [
            "Transform your space with the {title}. This carefully crafted item brings beauty and functionality to your home, creating an environment you'll love spending time in. Perfect for enhancing any room's aesthetic.",
            "Enhance your living space with the {title}. Combining aesthetic appeal with practical design, it's the perfect addition to create a warm and inviting atmosphere in your home.",
            "Create the home of your dreams with the {title}. This versatile piece offers both style and substance, making it easy to achieve the perfect balance of form and function in your space.",
        ],
        ProductCategory::SportsAndOutdoors => [
            "Take your performance to the next level with the {title}. Designed for athletes and outdoor enthusiasts, this equipment combines durability with cutting-edge technology for optimal results.",
            "Conquer the outdoors with the {title}. Built to withstand the elements while providing superior performance, this gear ensures you can focus on your adventure without worrying about equipment failure.",
            "Achieve your fitness goals with the {title}. This professional-grade equipment offers precision engineering and ergonomic design for maximum effectiveness and comfort during your workouts.",
        ],
        ProductCategory::BooksAndMedia => [
            "Immerse yourself in the world of the {title}. This captivating piece offers hours of entertainment and education, perfect for expanding your knowledge and imagination.",
            "Discover new perspectives with the {title}. Carefully curated content that challenges your thinking and broadens your horizons, making it an essential addition to your collection.",
            "Experience the magic of storytelling with the {title}. This engaging content delivers compelling narratives and valuable insights that will keep you entertained and informed.",
        ],
        ProductCategory::BeautyAndHealth => [
            "Enhance your natural beauty with the {title}. This premium product combines science-backed ingredients with luxurious formulations for visible results and indulgent self-care experiences.",
            "Prioritize your wellness with the {title}. Formulated with care and expertise, this health and beauty solution supports your journey to looking and feeling your absolute best.",
            "Transform your routine with the {title}. This innovative product delivers professional-quality results at home, making it easy to maintain your beauty and health goals.",
        ],
        ProductCategory::ToysAndGames => [
            "Spark imagination and creativity with the {title}. This engaging toy or game provides hours of entertainment while supporting developmental skills and family bonding time.",
            "Create lasting memories with the {title}. Perfect for children and families, this interactive item offers fun, learning, and quality time together in one engaging package.",
            "Unleash endless possibilities with the {title}. This versatile toy or game adapts to different ages and skill levels, ensuring years of enjoyment and educational value.",
        ],
        ProductCategory::Automotive => [
            "Upgrade your vehicle with the {title}. This premium automotive accessory or part combines precision engineering with durability, ensuring optimal performance and long-lasting reliability.",
            "Enhance your driving experience with the {title}. Designed for automotive enthusiasts and professionals, this product delivers superior quality and performance for your vehicle.",
            "Protect and improve your car with the {title}. This essential automotive product offers the perfect balance of functionality, style, and protection for your valuable investment.",
        ],
        ProductCategory::FoodAndBeverages => [
            "Savor the exceptional taste of the {title}. This premium food or beverage product offers authentic flavors and high-quality ingredients for an unforgettable culinary experience.",
            "Discover new flavors with the {title}. Carefully crafted using traditional methods and premium ingredients, this product delivers taste and quality that exceeds expectations.",
            "Elevate your dining experience with the {title}. This gourmet selection combines exceptional taste with premium quality, making every meal a special occasion.",
        ],
        ProductCategory::Other => [
            "Experience exceptional quality with the {title}. This versatile product offers reliable performance and thoughtful design for various applications and needs.",
            "Discover innovation with the {title}. This unique item combines creativity with functionality, providing solutions that enhance your daily life and activities.",
            "Upgrade your essentials with the {title}. This carefully designed product offers the perfect balance of style, function, and value for discerning customers.",
        ],
    }
}

/// Templated stand-in for a text generation service.
///
/// Output is deterministic for a given title and category; only the
/// simulated latency is random.
#[derive(Debug, Clone)]
pub struct TemplateGenerator {
    latency: RangeInclusive<Duration>,
}

impl TemplateGenerator {
    pub fn new(latency: RangeInclusive<Duration>) -> Self {
        Self { latency }
    }

    /// No simulated latency
    pub fn instant() -> Self {
        Self::new(Duration::ZERO..=Duration::ZERO)
    }

    /// Render the description for `input` without waiting.
    pub fn describe(input: &ProductInput) -> String {
        let candidates = templates(input.category);
        let seed = input
            .title
            .bytes()
            .fold(0usize, |acc, b| acc.wrapping_mul(31).wrapping_add(b as usize));
        candidates[seed % candidates.len()].replace(TITLE_PLACEHOLDER, &input.title)
    }

    fn pick_latency(&self) -> Duration {
        let (min, max) = (*self.latency.start(), *self.latency.end());
        if max <= min {
            return min;
        }
        let millis = rand::thread_rng().gen_range(min.as_millis()..=max.as_millis());
        Duration::from_millis(millis as u64)
    }
}

impl Default for TemplateGenerator {
    fn default() -> Self {
        Self::new(Duration::from_millis(1000)..=Duration::from_millis(2000))
    }
}

#[async_trait]
impl DescriptionGenerator for TemplateGenerator {
    async fn generate(&self, input: &ProductInput) -> Result<GenerationResponse, GeneratorError> {
        let delay = self.pick_latency();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let description = Self::describe(input);
        if description.trim().is_empty() {
            return Err(GeneratorError::EmptyDescription);
        }

        tracing::debug!(
            category = %input.category,
            latency_ms = delay.as_millis() as u64,
            "Generated description"
        );

        Ok(GenerationResponse {
            description,
            meta: ProductMeta::new(seo_keywords(input)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ImageUpload;

    fn input(title: &str, category: ProductCategory, price: f64) -> ProductInput {
        ProductInput::new(title, category, price, ImageUpload::new(vec![1, 2, 3], "image/png"))
    }

    #[tokio::test]
    async fn test_wireless_mouse_scenario() {
        let generator = TemplateGenerator::instant();
        let response = generator
            .generate(&input("Wireless Mouse", ProductCategory::Electronics, 29.99))
            .await
            .unwrap();

        assert!(response.description.contains("Wireless Mouse"));
        assert!(!response.description.contains(TITLE_PLACEHOLDER));
        assert_eq!(response.meta.language, "en");
        let kw = &response.meta.seo_keywords;
        assert!(kw.contains(&"wireless mouse".to_string()));
        assert!(kw.contains(&"electronics".to_string()));
        assert!(kw.iter().any(|k| k == "budget friendly" || k == "affordable"));
    }

    #[test]
    fn test_describe_is_deterministic_per_category() {
        for category in ProductCategory::ALL {
            let i = input("Sample Item", category, 10.0);
            let first = TemplateGenerator::describe(&i);
            assert_eq!(first, TemplateGenerator::describe(&i));
            assert!(templates(category)
                .iter()
                .any(|t| t.replace(TITLE_PLACEHOLDER, "Sample Item") == first));
        }
    }

    #[test]
    fn test_latency_within_range() {
        let generator =
            TemplateGenerator::new(Duration::from_millis(10)..=Duration::from_millis(20));
        for _ in 0..20 {
            let d = generator.pick_latency();
            assert!(d >= Duration::from_millis(10) && d <= Duration::from_millis(20));
        }
        assert_eq!(TemplateGenerator::instant().pick_latency(), Duration::ZERO);
    }
}
