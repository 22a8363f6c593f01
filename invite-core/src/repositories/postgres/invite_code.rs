// src/repositories/postgres/invite_code.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{Pool, Postgres, Row};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::Error;
use invite_common::models::{CreatorType, InviteCode, UserAddress};
use invite_common::traits::repository_traits::InviteCodeRepository;

const SELECT_INVITE_CODE: &str = r#"
    SELECT ic.invite_code_id,
           ic.code,
           ic.creator_type,
           ic.is_used,
           ic.created_at,
           ic.updated_at,
           c.address_id AS creator_address_id,
           c.address    AS creator_address,
           c.created_at AS creator_created_at,
           r.address_id AS redeemer_address_id,
           r.address    AS redeemer_address,
           r.created_at AS redeemer_created_at
    FROM invite_codes ic
    LEFT JOIN user_addresses c ON c.address_id = ic.creator_id
    LEFT JOIN user_addresses r ON r.address_id = ic.redeemer_id
"#;

#[derive(Clone)]
pub struct PostgresInviteCodeRepository {
    pool: Pool<Postgres>,
}

impl PostgresInviteCodeRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn joined_address(r: &PgRow, prefix: &str) -> Result<Option<UserAddress>, Error> {
    let address_id: Option<Uuid> = r.try_get(format!("{prefix}_address_id").as_str())?;
    match address_id {
        Some(address_id) => Ok(Some(UserAddress {
            address_id,
            address: r.try_get(format!("{prefix}_address").as_str())?,
            created_at: r.try_get::<DateTime<Utc>, _>(format!("{prefix}_created_at").as_str())?,
        })),
        None => Ok(None),
    }
}

fn row_to_invite_code(r: &PgRow) -> Result<InviteCode, Error> {
    let creator_type: String = r.try_get("creator_type")?;
    let creator_type = creator_type
        .parse::<CreatorType>()
        .map_err(|e| Error::Database(sqlx::Error::Decode(e.into())))?;

    Ok(InviteCode {
        invite_code_id: r.try_get("invite_code_id")?,
        code: r.try_get("code")?,
        creator: joined_address(r, "creator")?,
        creator_type,
        is_used: r.try_get("is_used")?,
        redeemer: joined_address(r, "redeemer")?,
        created_at: r.try_get::<DateTime<Utc>, _>("created_at")?,
        updated_at: r.try_get::<DateTime<Utc>, _>("updated_at")?,
    })
}

/// Unique violations on insert mean the generator collided with an existing code.
fn map_insert_error(e: sqlx::Error, code: &str) -> Error {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            warn!("Invite code collision on insert: {}", code);
            return Error::DuplicateCode(code.to_string());
        }
    }
    Error::Database(e)
}

#[async_trait]
impl InviteCodeRepository for PostgresInviteCodeRepository {
    async fn exists_unused(&self, code: &str) -> Result<bool, Error> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM invite_codes
                WHERE code = $1 AND is_used = FALSE
            )
            "#,
        )
            .bind(code)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<InviteCode>, Error> {
        let row = sqlx::query(&format!("{SELECT_INVITE_CODE} WHERE ic.code = $1"))
            .bind(code)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_invite_code).transpose()
    }

    async fn find_first_by_redeemer_address(&self, address: &str) -> Result<Option<InviteCode>, Error> {
        let row = sqlx::query(&format!(
            "{SELECT_INVITE_CODE} WHERE r.address = $1 ORDER BY ic.created_at ASC, ic.invite_code_id ASC LIMIT 1"
        ))
            .bind(address)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_invite_code).transpose()
    }

    async fn list_unused_codes_by_creator_address(&self, address: &str) -> Result<Vec<String>, Error> {
        let codes: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT ic.code
            FROM invite_codes ic
            JOIN user_addresses c ON c.address_id = ic.creator_id
            WHERE c.address = $1
              AND ic.is_used = FALSE
            ORDER BY ic.created_at ASC, ic.invite_code_id ASC
            "#,
        )
            .bind(address)
            .fetch_all(&self.pool)
            .await?;
        Ok(codes)
    }

    async fn bulk_create(&self, codes: &[InviteCode]) -> Result<Vec<InviteCode>, Error> {
        let mut tx = self.pool.begin().await?;

        for item in codes {
            sqlx::query(
                r#"
                INSERT INTO invite_codes (
                    invite_code_id,
                    code,
                    creator_id,
                    creator_type,
                    is_used,
                    redeemer_id,
                    created_at,
                    updated_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
                .bind(item.invite_code_id)
                .bind(&item.code)
                .bind(item.creator.as_ref().map(|a| a.address_id))
                .bind(item.creator_type.as_str())
                .bind(item.is_used)
                .bind(item.redeemer.as_ref().map(|a| a.address_id))
                .bind(item.created_at)
                .bind(item.updated_at)
                .execute(&mut *tx)
                .await
                .map_err(|e| map_insert_error(e, &item.code))?;
        }

        tx.commit().await?;
        debug!("Inserted {} invite codes", codes.len());
        Ok(codes.to_vec())
    }

    async fn redeem(&self, code: &str, redeemer_id: Uuid) -> Result<Option<InviteCode>, Error> {
        let mut tx = self.pool.begin().await?;

        let locked: Option<Uuid> = sqlx::query_scalar(
            "SELECT invite_code_id FROM invite_codes WHERE code = $1 FOR UPDATE",
        )
            .bind(code)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(invite_code_id) = locked else {
            return Ok(None);
        };

        sqlx::query(
            r#"
            UPDATE invite_codes
            SET redeemer_id = $1,
                is_used     = TRUE,
                updated_at  = $2
            WHERE invite_code_id = $3
            "#,
        )
            .bind(redeemer_id)
            .bind(Utc::now())
            .bind(invite_code_id)
            .execute(&mut *tx)
            .await?;

        let row = sqlx::query(&format!("{SELECT_INVITE_CODE} WHERE ic.invite_code_id = $1"))
            .bind(invite_code_id)
            .fetch_one(&mut *tx)
            .await?;
        let updated = row_to_invite_code(&row)?;

        tx.commit().await?;
        Ok(Some(updated))
    }
}
