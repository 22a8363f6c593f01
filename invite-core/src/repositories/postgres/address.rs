// src/repositories/postgres/address.rs

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::Error;
use invite_common::models::UserAddress;
use invite_common::traits::repository_traits::AddressRepository;

#[derive(Clone)]
pub struct PostgresAddressRepository {
    pool: Pool<Postgres>,
}

impl PostgresAddressRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AddressRepository for PostgresAddressRepository {
    async fn get_or_create(&self, address: &str) -> Result<UserAddress, Error> {
        // The no-op update makes RETURNING yield the existing row on conflict.
        let row = sqlx::query_as::<_, UserAddress>(
            r#"
            INSERT INTO user_addresses (address_id, address, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (address) DO UPDATE SET address = EXCLUDED.address
            RETURNING address_id, address, created_at
            "#,
        )
            .bind(Uuid::new_v4())
            .bind(address)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn get_by_address(&self, address: &str) -> Result<Option<UserAddress>, Error> {
        let row = sqlx::query_as::<_, UserAddress>(
            r#"
            SELECT address_id, address, created_at
            FROM user_addresses
            WHERE address = $1
            "#,
        )
            .bind(address)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }
}
