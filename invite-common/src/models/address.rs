use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An external wallet/account address. One row per distinct address string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserAddress {
    pub address_id: Uuid,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

impl UserAddress {
    pub fn new(address: &str) -> Self {
        Self {
            address_id: Uuid::new_v4(),
            address: address.to_string(),
            created_at: Utc::now(),
        }
    }
}
