//! 核心模块 - 配置与错误定义
//!
//! - [`StoreConfig`] - 存储与状态配置
//! - [`StoreError`] - 对调用方暴露的错误

pub mod config;
pub mod error;

pub use config::StoreConfig;
pub use error::{ErrorKind, StoreError, StoreResult};
