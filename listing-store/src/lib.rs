//! Listing Store - 商品发布编辑器的客户端状态与持久化
//!
//! # 架构概述
//!
//! - **状态** (`store`): 商品集合、当前选中、生成中标记与提示消息
//! - **持久化** (`persistence`): redb 主存储 + 进程内兜底，快照带版本信封
//! - **描述生成** (`generator`): 可注入的描述生成器，默认模板实现
//! - **图片处理** (`media`): 缩放并压缩为 JPEG data URL
//!
//! # 模块结构
//!
//! ```text
//! listing-store/src/
//! ├── core/          # 配置、错误
//! ├── store/         # ListingStore 状态与操作
//! ├── persistence/   # KV 存储与快照
//! ├── generator/     # 描述生成器
//! ├── media/         # 图片规范化
//! └── utils/         # 日志
//! ```

pub mod core;
pub mod generator;
pub mod media;
pub mod persistence;
pub mod store;
pub mod utils;

// Re-export 公共类型
pub use core::{ErrorKind, StoreConfig, StoreError, StoreResult};
pub use generator::{DescriptionGenerator, GeneratorError, TemplateGenerator};
pub use media::{ImageError, ImageNormalizer, NormalizedImage};
pub use persistence::{MemoryStorage, RedbStorage, StorageBackend, StorageError, TieredStorage};
pub use store::{ListingStore, StoreState};

// Re-export shared models
pub use shared::{
    GenerationResponse, ImageUpload, Product, ProductCategory, ProductInput, ProductMeta,
    ProductUpdate, ValidationError,
};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
