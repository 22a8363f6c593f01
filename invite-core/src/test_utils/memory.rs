// File: invite-core/src/test_utils/memory.rs

use std::sync::Arc;
use async_trait::async_trait;
use parking_lot::Mutex;
use uuid::Uuid;

use crate::Error;
use crate::services::{CodeGenerator, InviteService};
use invite_common::models::{InviteCode, UserAddress};
use invite_common::traits::repository_traits::{AddressRepository, InviteCodeRepository};

#[derive(Default)]
struct MemoryState {
    addresses: Vec<UserAddress>,
    codes: Vec<InviteCode>,
}

/// Both repositories backed by one mutex-guarded state. Rows keep insertion order.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<MemoryState>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// An `InviteService` wired to a fresh store; the store is returned for inspection.
    pub fn service() -> (Arc<Self>, InviteService) {
        let store = Self::new();
        let service = InviteService::new(store.clone(), store.clone(), CodeGenerator::default());
        (store, service)
    }

    pub fn address_count(&self) -> usize {
        self.state.lock().addresses.len()
    }

    pub fn code_count(&self) -> usize {
        self.state.lock().codes.len()
    }

    /// Stores `code` as-is, skipping every check. For seeding unusual rows.
    pub fn insert_raw(&self, code: InviteCode) {
        self.state.lock().codes.push(code);
    }
}

#[async_trait]
impl AddressRepository for InMemoryStore {
    async fn get_or_create(&self, address: &str) -> Result<UserAddress, Error> {
        let mut state = self.state.lock();
        if let Some(existing) = state.addresses.iter().find(|a| a.address == address) {
            return Ok(existing.clone());
        }
        let created = UserAddress::new(address);
        state.addresses.push(created.clone());
        Ok(created)
    }

    async fn get_by_address(&self, address: &str) -> Result<Option<UserAddress>, Error> {
        let state = self.state.lock();
        Ok(state.addresses.iter().find(|a| a.address == address).cloned())
    }
}

#[async_trait]
impl InviteCodeRepository for InMemoryStore {
    async fn exists_unused(&self, code: &str) -> Result<bool, Error> {
        let state = self.state.lock();
        Ok(state.codes.iter().any(|c| c.code == code && !c.is_used))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<InviteCode>, Error> {
        let state = self.state.lock();
        Ok(state.codes.iter().find(|c| c.code == code).cloned())
    }

    async fn find_first_by_redeemer_address(&self, address: &str) -> Result<Option<InviteCode>, Error> {
        let state = self.state.lock();
        Ok(state
            .codes
            .iter()
            .find(|c| c.redeemer_address() == Some(address))
            .cloned())
    }

    async fn list_unused_codes_by_creator_address(&self, address: &str) -> Result<Vec<String>, Error> {
        let state = self.state.lock();
        Ok(state
            .codes
            .iter()
            .filter(|c| !c.is_used && c.creator_address() == Some(address))
            .map(|c| c.code.clone())
            .collect())
    }

    async fn bulk_create(&self, codes: &[InviteCode]) -> Result<Vec<InviteCode>, Error> {
        let mut state = self.state.lock();

        // Check the whole batch before touching state so a failure inserts nothing.
        for (i, item) in codes.iter().enumerate() {
            let clashes_stored = state.codes.iter().any(|c| c.code == item.code);
            let clashes_batch = codes[..i].iter().any(|c| c.code == item.code);
            if clashes_stored || clashes_batch {
                return Err(Error::DuplicateCode(item.code.clone()));
            }
        }

        state.codes.extend_from_slice(codes);
        Ok(codes.to_vec())
    }

    async fn redeem(&self, code: &str, redeemer_id: Uuid) -> Result<Option<InviteCode>, Error> {
        let mut state = self.state.lock();

        let redeemer = state
            .addresses
            .iter()
            .find(|a| a.address_id == redeemer_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("address {redeemer_id}")))?;

        match state.codes.iter_mut().find(|c| c.code == code) {
            Some(item) => {
                item.redeem(redeemer);
                Ok(Some(item.clone()))
            }
            None => Ok(None),
        }
    }
}
