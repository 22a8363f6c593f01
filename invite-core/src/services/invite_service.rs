use std::sync::Arc;
use tracing::{info, warn};

use crate::Error;
use crate::services::code_generator::CodeGenerator;
use invite_common::models::{
    ActivationOutcome, AddressActivation, CreatorType, InviteCode,
};
use invite_common::traits::repository_traits::{AddressRepository, InviteCodeRepository};

pub const DEFAULT_MAX_CODES_PER_REQUEST: usize = 1000;

/// The invite workflow: generation, checks, activation and queries over the
/// Address Registry and the Invite Code Pool.
pub struct InviteService {
    addresses: Arc<dyn AddressRepository>,
    codes: Arc<dyn InviteCodeRepository>,
    generator: CodeGenerator,
    max_codes_per_request: usize,
}

impl InviteService {
    pub fn new(
        addresses: Arc<dyn AddressRepository>,
        codes: Arc<dyn InviteCodeRepository>,
        generator: CodeGenerator,
    ) -> Self {
        Self {
            addresses,
            codes,
            generator,
            max_codes_per_request: DEFAULT_MAX_CODES_PER_REQUEST,
        }
    }

    pub fn with_max_codes_per_request(mut self, max: usize) -> Self {
        self.max_codes_per_request = max;
        self
    }

    pub fn max_codes_per_request(&self) -> usize {
        self.max_codes_per_request
    }

    /// Whether `code` exists and is still unused. Unknown and used codes both yield false.
    pub async fn check_code(&self, code: &str) -> Result<bool, Error> {
        self.codes.exists_unused(code).await
    }

    pub async fn check_address(&self, address: &str) -> Result<AddressActivation, Error> {
        match self.codes.find_first_by_redeemer_address(address).await? {
            None => Ok(AddressActivation::NeverRedeemed),
            Some(code) => {
                if !code.is_used {
                    warn!(
                        "Invite code {} has redeemer {} but is not marked used",
                        code.code, address
                    );
                }
                Ok(AddressActivation::Redeemed { is_used: code.is_used })
            }
        }
    }

    /// Redeems `code` for `address`.
    ///
    /// The address is registered before the code lookup, so it exists even when
    /// the code does not. An already-used code is re-bound to the new address.
    pub async fn activate(&self, code: &str, address: &str) -> Result<ActivationOutcome, Error> {
        let redeemer = self.addresses.get_or_create(address).await?;

        match self.codes.redeem(code, redeemer.address_id).await? {
            Some(updated) => {
                info!("Invite code {} activated by {}", updated.code, address);
                Ok(ActivationOutcome::Activated(updated))
            }
            None => {
                info!("Activation of unknown invite code {} by {}", code, address);
                Ok(ActivationOutcome::CodeNotFound)
            }
        }
    }

    /// Creates `count` fresh codes in one atomic batch.
    pub async fn generate(
        &self,
        count: usize,
        creator_address: Option<&str>,
        creator_type: CreatorType,
    ) -> Result<Vec<InviteCode>, Error> {
        if count == 0 || count > self.max_codes_per_request {
            return Err(Error::InvalidInput(format!(
                "code count must be between 1 and {}, got {}",
                self.max_codes_per_request, count
            )));
        }

        let creator = match creator_address {
            Some(address) => Some(self.addresses.get_or_create(address).await?),
            None => None,
        };

        let batch: Vec<InviteCode> = self
            .generator
            .generate(count)?
            .iter()
            .map(|code| InviteCode::new(code, creator.clone(), creator_type))
            .collect();

        let created = self.codes.bulk_create(&batch).await?;
        info!(
            "Generated {} invite codes (creator={:?}, type={})",
            created.len(),
            creator_address,
            creator_type
        );
        Ok(created)
    }

    pub async fn list_unused_codes_by_creator(&self, address: &str) -> Result<Vec<String>, Error> {
        self.codes.list_unused_codes_by_creator_address(address).await
    }

    pub async fn get_code_detail(&self, code: &str) -> Result<Option<InviteCode>, Error> {
        self.codes.find_by_code(code).await
    }
}
