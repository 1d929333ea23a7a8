//! Quickstart - 创建并编辑一条商品，重复运行可看到持久化的结果
//!
//! Run: cargo run --example quickstart [image-path]
//!
//! 未提供图片时使用生成的渐变图。配置从 `.env` / 环境变量读取。

use std::io::Cursor;

use image::{ImageFormat, Rgb, RgbImage};
use listing_store::{
    ImageUpload, ListingStore, ProductCategory, ProductInput, ProductUpdate, StoreConfig,
    init_logger,
};

fn sample_png() -> anyhow::Result<Vec<u8>> {
    let img = RgbImage::from_fn(1600, 900, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)?;
    Ok(buf.into_inner())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_logger()?;

    let config = StoreConfig::from_env();
    let store = ListingStore::open(config);
    println!("Loaded {} product(s)", store.product_count());

    let upload = match std::env::args().nth(1) {
        Some(path) => {
            let bytes = std::fs::read(&path)?;
            ImageUpload::new(bytes, "image/*").with_file_name(path)
        }
        None => ImageUpload::new(sample_png()?, "image/png").with_file_name("sample.png"),
    };

    let input = ProductInput::new("Wireless Mouse", ProductCategory::Electronics, 29.99, upload);
    input.validate()?;

    let product = match store.add_product(input).await {
        Ok(product) => product,
        Err(e) => {
            eprintln!("[{}] {}", e.kind(), e);
            return Ok(());
        }
    };
    println!("{}", store.success().unwrap_or_default());
    println!("  id:          {}", product.id);
    println!("  description: {}", product.description);
    println!("  keywords:    {}", product.meta.seo_keywords.join(", "));
    println!("  image:       {} bytes (data URL)", product.image_url.len());

    store.update_product(
        &product.id,
        ProductUpdate {
            price: Some(24.99),
            ..Default::default()
        },
    );
    if let Some(updated) = store.product(&product.id) {
        println!("Updated price: {:.2}", updated.price);
    }

    println!("Products now stored: {}", store.product_count());
    Ok(())
}
