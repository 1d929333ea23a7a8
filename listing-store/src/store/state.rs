use shared::Product;

use crate::core::ErrorKind;
use crate::persistence::PersistedState;

/// Store 状态
///
/// `products` 与 `selected_product_id` 会被持久化，其余字段为瞬时 UI 状态。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreState {
    pub products: Vec<Product>,
    pub selected_product_id: Option<String>,
    pub is_generating: bool,
    pub error: Option<String>,
    /// 最近一次由 store 产生的错误类别 (`set_error` 手动设置时为 None)
    pub error_kind: Option<ErrorKind>,
    pub success: Option<String>,
}

impl StoreState {
    /// 从持久化快照恢复，瞬时字段取默认值
    pub fn from_persisted(persisted: PersistedState) -> Self {
        Self {
            products: persisted.products,
            selected_product_id: persisted.selected_product_id,
            ..Default::default()
        }
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn selected_product(&self) -> Option<&Product> {
        self.selected_product_id
            .as_deref()
            .and_then(|id| self.product(id))
    }

    /// 追加商品并按 FIFO 淘汰超出上限的旧商品，返回被淘汰的数量
    pub(crate) fn push_bounded(&mut self, product: Product, max_products: usize) -> usize {
        self.products.push(product);
        let excess = self.products.len().saturating_sub(max_products);
        if excess > 0 {
            let evicted: Vec<Product> = self.products.drain(..excess).collect();
            if let Some(selected) = &self.selected_product_id
                && evicted.iter().any(|p| &p.id == selected)
            {
                self.selected_product_id = None;
            }
        }
        excess
    }
}
