//! Persisted subset of the store state

use serde::{Deserialize, Serialize};
use shared::Product;

/// Current snapshot layout version
pub const SNAPSHOT_VERSION: u32 = 0;

/// Only the durable part of the state; status fields are never written
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub selected_product_id: Option<String>,
}

impl PersistedState {
    /// Enforce collection invariants on data read from disk.
    ///
    /// Keeps the newest `max_products`, drops duplicate ids (first wins) and
    /// clears a selection that no longer points at a product.
    pub fn sanitize(mut self, max_products: usize) -> Self {
        let mut seen = std::collections::HashSet::new();
        self.products.retain(|p| seen.insert(p.id.clone()));

        if self.products.len() > max_products {
            let excess = self.products.len() - max_products;
            self.products.drain(..excess);
        }

        if let Some(id) = &self.selected_product_id
            && !self.products.iter().any(|p| &p.id == id)
        {
            self.selected_product_id = None;
        }
        self
    }
}

/// On-disk wrapper `{ "state": ..., "version": N }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotEnvelope {
    pub state: PersistedState,
    pub version: u32,
}

impl SnapshotEnvelope {
    pub fn new(state: PersistedState) -> Self {
        Self {
            state,
            version: SNAPSHOT_VERSION,
        }
    }

    pub fn encode(&self) -> serde_json::Result<String> {
        encode_snapshot(&self.state.products, self.state.selected_product_id.as_deref())
    }

    /// Parse a stored snapshot; `None` (with a warning) when it is
    /// malformed or from an unknown version.
    pub fn decode(raw: &str) -> Option<PersistedState> {
        match serde_json::from_str::<SnapshotEnvelope>(raw) {
            Ok(envelope) if envelope.version == SNAPSHOT_VERSION => Some(envelope.state),
            Ok(envelope) => {
                tracing::warn!(
                    version = envelope.version,
                    expected = SNAPSHOT_VERSION,
                    "Discarding snapshot with unsupported version"
                );
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "Discarding malformed snapshot");
                None
            }
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StateRef<'a> {
    products: &'a [Product],
    selected_product_id: Option<&'a str>,
}

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    state: StateRef<'a>,
    version: u32,
}

/// Serialize without cloning the product list (images are inline and large).
pub fn encode_snapshot(
    products: &[Product],
    selected_product_id: Option<&str>,
) -> serde_json::Result<String> {
    serde_json::to_string(&EnvelopeRef {
        state: StateRef {
            products,
            selected_product_id,
        },
        version: SNAPSHOT_VERSION,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{ImageUpload, ProductCategory, ProductInput, ProductMeta};

    fn product(title: &str) -> Product {
        let input = ProductInput::new(
            title,
            ProductCategory::Other,
            5.0,
            ImageUpload::new(vec![], "image/png"),
        );
        Product::new(&input, "img".into(), "desc".into(), ProductMeta::default())
    }

    #[test]
    fn test_envelope_shape() {
        let p = product("Lamp");
        let state = PersistedState {
            selected_product_id: Some(p.id.clone()),
            products: vec![p],
        };
        let raw = SnapshotEnvelope::new(state.clone()).encode().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["version"], 0);
        assert!(value["state"]["selectedProductId"].is_string());
        assert!(value["state"].get("isGenerating").is_none());

        assert_eq!(SnapshotEnvelope::decode(&raw), Some(state));
    }

    #[test]
    fn test_decode_tolerates_bad_input() {
        assert_eq!(SnapshotEnvelope::decode("not json"), None);
        assert_eq!(
            SnapshotEnvelope::decode(r#"{"state":{},"version":7}"#),
            None
        );
        assert_eq!(
            SnapshotEnvelope::decode(r#"{"state":{},"version":0}"#),
            Some(PersistedState::default())
        );
    }

    #[test]
    fn test_sanitize() {
        let products: Vec<Product> = (0..5).map(|i| product(&format!("p{i}"))).collect();
        let mut dup = products[4].clone();
        dup.title = "duplicate".into();

        let mut all = products.clone();
        all.push(dup);
        let state = PersistedState {
            selected_product_id: Some(products[0].id.clone()),
            products: all,
        }
        .sanitize(3);

        let titles: Vec<_> = state.products.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["p2", "p3", "p4"]);
        // p0 was trimmed, so the selection is cleared
        assert_eq!(state.selected_product_id, None);
    }
}
