use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Error;
use crate::models::address::UserAddress;
use crate::models::invite::InviteCode;

/// Address Registry storage.
#[async_trait]
pub trait AddressRepository: Send + Sync {
    /// Returns the row for `address`, inserting it first if needed.
    async fn get_or_create(&self, address: &str) -> Result<UserAddress, Error>;
    async fn get_by_address(&self, address: &str) -> Result<Option<UserAddress>, Error>;
}

/// Invite Code Pool storage.
#[async_trait]
pub trait InviteCodeRepository: Send + Sync {
    /// True when `code` exists and has not been used.
    async fn exists_unused(&self, code: &str) -> Result<bool, Error>;

    async fn find_by_code(&self, code: &str) -> Result<Option<InviteCode>, Error>;

    /// Oldest code whose redeemer is `address`.
    async fn find_first_by_redeemer_address(&self, address: &str) -> Result<Option<InviteCode>, Error>;

    async fn list_unused_codes_by_creator_address(&self, address: &str) -> Result<Vec<String>, Error>;

    /// Inserts every code or none of them. Returns the stored rows in input order.
    async fn bulk_create(&self, codes: &[InviteCode]) -> Result<Vec<InviteCode>, Error>;

    /// Marks `code` used by `redeemer_id`, overwriting any previous redeemer.
    /// Returns `None` when no such code exists.
    async fn redeem(&self, code: &str, redeemer_id: Uuid) -> Result<Option<InviteCode>, Error>;
}
