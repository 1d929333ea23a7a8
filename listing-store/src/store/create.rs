//! 商品创建流程
//!
//! 两个创建操作只在生成器调用和图片处理两处挂起；失败时不会追加任何商品。

use shared::{GenerationResponse, Product, ProductInput, ProductMeta};

use super::{ListingStore, MessageField, clear_message_fields};
use crate::core::{StoreError, StoreResult};
use crate::generator::boilerplate_keywords;

const GENERATED_SUCCESS: &str = "Product description generated successfully!";
const SAVED_SUCCESS: &str = "Product listing saved successfully!";

impl ListingStore {
    /// 调用生成器生成描述并保存商品
    pub async fn add_product(&self, input: ProductInput) -> StoreResult<Product> {
        self.begin_generation();

        let result = async {
            let response = self.generate_description_for_product(&input).await?;
            self.build_product(&input, response.description, response.meta)
                .await
        }
        .await;

        self.finish_creation(result, GENERATED_SUCCESS)
    }

    /// 使用调用方提供的描述保存商品，不调用生成器
    pub async fn add_product_with_description(
        &self,
        input: ProductInput,
        description: impl Into<String>,
    ) -> StoreResult<Product> {
        self.begin_generation();

        let meta = ProductMeta::new(boilerplate_keywords(&input.title, input.category));
        let result = self.build_product(&input, description.into(), meta).await;

        self.finish_creation(result, SAVED_SUCCESS)
    }

    /// 委托生成器；任何失败统一为 [`StoreError::GenerationFailed`]
    pub async fn generate_description_for_product(
        &self,
        input: &ProductInput,
    ) -> StoreResult<GenerationResponse> {
        self.inner.generator.generate(input).await.map_err(|e| {
            tracing::warn!(title = %input.title, error = %e, "Description generation failed");
            StoreError::from(e)
        })
    }

    fn begin_generation(&self) {
        {
            let mut locked = self.inner.locked.lock();
            locked.status.bump_all();
            locked.state.is_generating = true;
            clear_message_fields(&mut locked.state);
        }
        self.notify();
    }

    /// 图片规范化 + 组装实体；返回前确认实体能从快照中读回
    async fn build_product(
        &self,
        input: &ProductInput,
        description: String,
        meta: ProductMeta,
    ) -> StoreResult<Product> {
        // serde_json 会把 NaN/inf 写成 null，之后整个快照都无法解析
        if !input.price.is_finite() {
            tracing::warn!(
                title = %input.title,
                price = input.price,
                "Rejecting non-finite price"
            );
            return Err(StoreError::StorageUnavailable { source: None });
        }

        let image = self
            .inner
            .normalizer
            .normalize_async(input.image.bytes.clone())
            .await
            .map_err(|e| {
                tracing::warn!(
                    title = %input.title,
                    file = ?input.image.file_name,
                    error = %e,
                    "Image normalization failed"
                );
                StoreError::from(e)
            })?;

        let product = Product::new(input, image.to_data_url(), description, meta);
        let raw = serde_json::to_string(&product)?;
        serde_json::from_str::<Product>(&raw)?;
        Ok(product)
    }

    /// 单次加锁内提交结果：追加 + 淘汰 + 选中 + 提示 + 持久化
    fn finish_creation(
        &self,
        result: StoreResult<Product>,
        success: &'static str,
    ) -> StoreResult<Product> {
        let mut locked = self.inner.locked.lock();
        match result {
            Ok(product) => {
                let id = product.id.clone();
                let evicted = locked
                    .state
                    .push_bounded(product.clone(), self.inner.config.max_products);
                locked.state.selected_product_id = Some(id.clone());
                locked.state.is_generating = false;
                self.persist(&locked.state);
                self.show_message(&mut locked, MessageField::Success, success.to_string());
                let total = locked.state.products.len();
                drop(locked);

                tracing::info!(id = %id, total, evicted, "Product created");
                self.notify();
                Ok(product)
            }
            Err(err) => {
                self.fail(&mut locked, &err);
                drop(locked);

                tracing::error!(kind = %err.kind(), error = %err, "Product creation failed");
                self.notify();
                Err(err)
            }
        }
    }
}
