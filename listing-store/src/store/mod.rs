//! ListingStore - 商品列表状态与持久化
//!
//! 显式的上下文对象（非全局单例），克隆代价很低，可注入到任意调用方。
//! 所有状态变更在一次加锁内完成，观察者不会看到半更新的状态。
//! 每次变更后同步写入持久化快照（写失败由 [`TieredStorage`] 兜底）。

mod create;
mod state;
mod status;

use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use shared::{Product, ProductUpdate};
use tokio::sync::watch;

use crate::core::{ErrorKind, StoreConfig, StoreError};
use crate::generator::{DescriptionGenerator, TemplateGenerator};
use crate::media::ImageNormalizer;
use crate::persistence::{SnapshotEnvelope, TieredStorage, encode_snapshot};

pub use state::StoreState;
use status::{MessageField, StatusTracker};

const DELETE_SUCCESS: &str = "Product deleted successfully!";

struct Locked {
    state: StoreState,
    status: StatusTracker,
}

struct Inner {
    locked: Mutex<Locked>,
    storage: TieredStorage,
    generator: Arc<dyn DescriptionGenerator>,
    normalizer: ImageNormalizer,
    config: StoreConfig,
    revision: watch::Sender<u64>,
}

/// 商品列表 Store
#[derive(Clone)]
pub struct ListingStore {
    inner: Arc<Inner>,
}

impl ListingStore {
    /// 按配置打开 redb 存储并使用模板生成器
    pub fn open(config: StoreConfig) -> Self {
        let storage = TieredStorage::open(&config.data_path, config.storage_quota);
        let generator = Arc::new(TemplateGenerator::new(config.generator_latency.clone()));
        Self::new(config, storage, generator)
    }

    /// 使用注入的存储与生成器创建，并从存储中恢复状态
    pub fn new(
        config: StoreConfig,
        storage: TieredStorage,
        generator: Arc<dyn DescriptionGenerator>,
    ) -> Self {
        let persisted = storage
            .get(&config.storage_key)
            .and_then(|raw| SnapshotEnvelope::decode(&raw))
            .unwrap_or_default()
            .sanitize(config.max_products);

        tracing::info!(
            products = persisted.products.len(),
            selected = ?persisted.selected_product_id,
            durable = storage.is_durable(),
            "Product store rehydrated"
        );

        let (revision, _) = watch::channel(0);
        let normalizer = ImageNormalizer::new(config.image_max_dimension, config.image_quality);

        Self {
            inner: Arc::new(Inner {
                locked: Mutex::new(Locked {
                    state: StoreState::from_persisted(persisted),
                    status: StatusTracker::default(),
                }),
                storage,
                generator,
                normalizer,
                config,
                revision,
            }),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.inner.config
    }

    // ========== Selectors ==========

    /// 当前完整状态的一致性副本
    pub fn snapshot(&self) -> StoreState {
        self.inner.locked.lock().state.clone()
    }

    pub fn products(&self) -> Vec<Product> {
        self.inner.locked.lock().state.products.clone()
    }

    pub fn product(&self, id: &str) -> Option<Product> {
        self.inner.locked.lock().state.product(id).cloned()
    }

    pub fn product_count(&self) -> usize {
        self.inner.locked.lock().state.products.len()
    }

    pub fn selected_product_id(&self) -> Option<String> {
        self.inner.locked.lock().state.selected_product_id.clone()
    }

    pub fn selected_product(&self) -> Option<Product> {
        self.inner.locked.lock().state.selected_product().cloned()
    }

    pub fn is_generating(&self) -> bool {
        self.inner.locked.lock().state.is_generating
    }

    pub fn error(&self) -> Option<String> {
        self.inner.locked.lock().state.error.clone()
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.inner.locked.lock().state.error_kind
    }

    pub fn success(&self) -> Option<String> {
        self.inner.locked.lock().state.success.clone()
    }

    /// 订阅状态变化；值为单调递增的修订号
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.inner.revision.subscribe()
    }

    // ========== Mutations ==========

    /// 合并字段并刷新 `updated_at`；id 不存在时静默忽略
    ///
    /// 非有限价格 (NaN/inf) 无法写入快照，会被丢弃；合并后为空的更新不产生写入。
    pub fn update_product(&self, id: &str, mut update: ProductUpdate) -> bool {
        if let Some(price) = update.price
            && !price.is_finite()
        {
            tracing::warn!(id = %id, price, "Ignoring non-finite price update");
            update.price = None;
        }

        let mut locked = self.inner.locked.lock();
        let Some(product) = locked.state.products.iter_mut().find(|p| p.id == id) else {
            tracing::debug!(id = %id, "Update ignored, product not found");
            return false;
        };
        if update.is_empty() {
            return true;
        }
        product.apply_update(update);
        self.persist(&locked.state);
        drop(locked);

        tracing::debug!(id = %id, "Product updated");
        self.notify();
        true
    }

    /// 删除商品；若为当前选中则清空选中。id 不存在时静默忽略
    pub fn delete_product(&self, id: &str) -> bool {
        let mut locked = self.inner.locked.lock();
        let Some(index) = locked.state.products.iter().position(|p| p.id == id) else {
            tracing::debug!(id = %id, "Delete ignored, product not found");
            return false;
        };
        locked.state.products.remove(index);
        if locked.state.selected_product_id.as_deref() == Some(id) {
            locked.state.selected_product_id = None;
        }
        self.persist(&locked.state);
        self.show_message(&mut locked, MessageField::Success, DELETE_SUCCESS.to_string());
        drop(locked);

        tracing::info!(id = %id, "Product deleted");
        self.notify();
        true
    }

    /// 直接赋值，不校验 id 是否存在
    pub fn select_product(&self, id: Option<&str>) {
        let mut locked = self.inner.locked.lock();
        locked.state.selected_product_id = id.map(str::to_string);
        self.persist(&locked.state);
        drop(locked);
        self.notify();
    }

    pub fn set_generating(&self, generating: bool) {
        self.inner.locked.lock().state.is_generating = generating;
        self.notify();
    }

    pub fn set_error(&self, error: Option<String>) {
        {
            let mut locked = self.inner.locked.lock();
            locked.status.bump(MessageField::Error);
            locked.state.error = error;
            locked.state.error_kind = None;
        }
        self.notify();
    }

    pub fn set_success(&self, success: Option<String>) {
        {
            let mut locked = self.inner.locked.lock();
            locked.status.bump(MessageField::Success);
            locked.state.success = success;
        }
        self.notify();
    }

    pub fn clear_messages(&self) {
        {
            let mut locked = self.inner.locked.lock();
            locked.status.bump_all();
            clear_message_fields(&mut locked.state);
        }
        self.notify();
    }

    // ========== Internals ==========

    fn notify(&self) {
        self.inner.revision.send_modify(|rev| *rev = rev.wrapping_add(1));
    }

    /// 写入持久化子集；失败已由存储层降级处理
    fn persist(&self, state: &StoreState) {
        match encode_snapshot(&state.products, state.selected_product_id.as_deref()) {
            Ok(raw) => self.inner.storage.set(&self.inner.config.storage_key, &raw),
            Err(e) => tracing::error!(error = %e, "Failed to serialize store snapshot"),
        }
    }

    /// 设置提示消息并安排自动清除
    fn show_message(&self, locked: &mut Locked, field: MessageField, message: String) {
        let after = match field {
            MessageField::Success => {
                locked.state.success = Some(message);
                self.inner.config.success_clear_after
            }
            MessageField::Error => {
                locked.state.error = Some(message);
                self.inner.config.error_clear_after
            }
        };
        let generation = locked.status.bump(field);
        self.schedule_clear(locked, field, generation, after);
    }

    fn fail(&self, locked: &mut Locked, err: &StoreError) {
        locked.state.is_generating = false;
        locked.state.error_kind = Some(err.kind());
        self.show_message(locked, MessageField::Error, err.to_string());
    }

    fn schedule_clear(
        &self,
        locked: &mut Locked,
        field: MessageField,
        generation: u64,
        after: Duration,
    ) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::debug!(?field, "No async runtime, message will not auto-clear");
            return;
        };
        let weak: Weak<Inner> = Arc::downgrade(&self.inner);
        let task = runtime.spawn(async move {
            tokio::time::sleep(after).await;
            if let Some(inner) = weak.upgrade() {
                ListingStore { inner }.expire_message(field, generation);
            }
        });
        locked.status.arm(field, task.abort_handle());
    }

    fn expire_message(&self, field: MessageField, generation: u64) {
        {
            let mut locked = self.inner.locked.lock();
            if !locked.status.expire(field, generation) {
                return;
            }
            match field {
                MessageField::Success => locked.state.success = None,
                MessageField::Error => {
                    locked.state.error = None;
                    locked.state.error_kind = None;
                }
            }
        }
        tracing::debug!(?field, "Status message cleared");
        self.notify();
    }
}

fn clear_message_fields(state: &mut StoreState) {
    state.error = None;
    state.error_kind = None;
    state.success = None;
}

impl std::fmt::Debug for ListingStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListingStore")
            .field("storage", &self.inner.storage)
            .field("products", &self.product_count())
            .finish_non_exhaustive()
    }
}
