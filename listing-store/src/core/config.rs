use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::time::Duration;

/// Store 配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | LISTING_DATA_PATH | ./data/listings.redb | 持久化文件路径 |
/// | LISTING_STORAGE_KEY | product-store | 快照存储键 |
/// | LISTING_MAX_PRODUCTS | 50 | 最多保存的商品数 |
/// | LISTING_STORAGE_QUOTA | 5242880 | 单个值的字节上限 (0 = 不限) |
/// | LISTING_SUCCESS_CLEAR_MS | 3000 | 成功提示自动清除(毫秒) |
/// | LISTING_ERROR_CLEAR_MS | 5000 | 错误提示自动清除(毫秒) |
/// | LISTING_IMAGE_MAX_DIM | 1024 | 图片最长边 |
/// | LISTING_IMAGE_QUALITY | 70 | JPEG 质量 (1-100) |
/// | LISTING_GEN_MIN_MS | 1000 | 生成器最小延迟 |
/// | LISTING_GEN_MAX_MS | 2000 | 生成器最大延迟 |
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// redb 文件路径
    pub data_path: PathBuf,
    /// 快照在 KV 存储中的键
    pub storage_key: String,
    /// 集合上限，超出时从最旧的开始淘汰
    pub max_products: usize,
    /// 主存储单值配额，`None` 表示不限
    pub storage_quota: Option<usize>,
    pub success_clear_after: Duration,
    pub error_clear_after: Duration,
    pub image_max_dimension: u32,
    pub image_quality: u8,
    /// 模拟生成器延迟区间
    pub generator_latency: RangeInclusive<Duration>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("./data/listings.redb"),
            storage_key: "product-store".to_string(),
            max_products: 50,
            storage_quota: Some(5 * 1024 * 1024),
            success_clear_after: Duration::from_millis(3000),
            error_clear_after: Duration::from_millis(5000),
            image_max_dimension: 1024,
            image_quality: 70,
            generator_latency: Duration::from_millis(1000)..=Duration::from_millis(2000),
        }
    }
}

impl StoreConfig {
    /// 从环境变量加载配置，未设置或无法解析时使用默认值
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 通过任意查找函数加载配置
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let parsed = |key: &str| lookup(key).and_then(|v| v.trim().parse::<u64>().ok());
        let millis = |key: &str, default: Duration| {
            parsed(key).map(Duration::from_millis).unwrap_or(default)
        };

        let gen_min = millis("LISTING_GEN_MIN_MS", *defaults.generator_latency.start());
        let gen_max = millis("LISTING_GEN_MAX_MS", *defaults.generator_latency.end()).max(gen_min);

        Self {
            data_path: lookup("LISTING_DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_path),
            storage_key: lookup("LISTING_STORAGE_KEY")
                .filter(|k| !k.trim().is_empty())
                .unwrap_or(defaults.storage_key),
            max_products: parsed("LISTING_MAX_PRODUCTS")
                .filter(|n| *n > 0)
                .map(|n| n as usize)
                .unwrap_or(defaults.max_products),
            storage_quota: match parsed("LISTING_STORAGE_QUOTA") {
                Some(0) => None,
                Some(n) => Some(n as usize),
                None => defaults.storage_quota,
            },
            success_clear_after: millis("LISTING_SUCCESS_CLEAR_MS", defaults.success_clear_after),
            error_clear_after: millis("LISTING_ERROR_CLEAR_MS", defaults.error_clear_after),
            image_max_dimension: parsed("LISTING_IMAGE_MAX_DIM")
                .filter(|n| *n > 0)
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(defaults.image_max_dimension),
            image_quality: parsed("LISTING_IMAGE_QUALITY")
                .filter(|q| (1..=100).contains(q))
                .map(|q| q as u8)
                .unwrap_or(defaults.image_quality),
            generator_latency: gen_min..=gen_max,
        }
    }

    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = path.into();
        self
    }

    pub fn with_max_products(mut self, max: usize) -> Self {
        self.max_products = max.max(1);
        self
    }

    pub fn with_message_timeouts(mut self, success: Duration, error: Duration) -> Self {
        self.success_clear_after = success;
        self.error_clear_after = error;
        self
    }

    /// 无延迟生成器 (测试用)
    pub fn with_instant_generator(mut self) -> Self {
        self.generator_latency = Duration::ZERO..=Duration::ZERO;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = StoreConfig::from_lookup(|_| None);
        assert_eq!(config.storage_key, "product-store");
        assert_eq!(config.max_products, 50);
        assert_eq!(config.success_clear_after, Duration::from_millis(3000));
        assert_eq!(config.image_max_dimension, 1024);
        assert_eq!(config.image_quality, 70);
        assert_eq!(config.storage_quota, Some(5 * 1024 * 1024));
    }

    #[test]
    fn test_overrides_and_bad_values() {
        let config = StoreConfig::from_lookup(lookup(&[
            ("LISTING_MAX_PRODUCTS", "10"),
            ("LISTING_IMAGE_QUALITY", "250"),
            ("LISTING_STORAGE_QUOTA", "0"),
            ("LISTING_SUCCESS_CLEAR_MS", "abc"),
            ("LISTING_GEN_MIN_MS", "500"),
            ("LISTING_GEN_MAX_MS", "100"),
            ("LISTING_DATA_PATH", "/tmp/x.redb"),
        ]));
        assert_eq!(config.max_products, 10);
        assert_eq!(config.image_quality, 70);
        assert_eq!(config.storage_quota, None);
        assert_eq!(config.success_clear_after, Duration::from_millis(3000));
        assert_eq!(config.data_path, PathBuf::from("/tmp/x.redb"));
        // max is clamped up to min
        assert_eq!(
            config.generator_latency,
            Duration::from_millis(500)..=Duration::from_millis(500)
        );
    }
}
