use chrono::{DateTime, Utc};

/// Current UTC time, used for `createdAt` / `updatedAt`.
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Generate a product id (UUID v4, hyphenated).
pub fn new_product_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
