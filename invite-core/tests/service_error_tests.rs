// File: invite-core/tests/service_error_tests.rs

use std::sync::Arc;
use async_trait::async_trait;
use mockall::mock;
use mockall::predicate::eq;
use uuid::Uuid;

use invite_common::traits::repository_traits::{AddressRepository, InviteCodeRepository};
use invite_core::{
    models::{ActivationOutcome, CreatorType, InviteCode, UserAddress},
    CodeGenerator, Error, InviteService,
};

mock! {
    AddressRepo {}
    #[async_trait]
    impl AddressRepository for AddressRepo {
        async fn get_or_create(&self, address: &str) -> Result<UserAddress, Error>;
        async fn get_by_address(&self, address: &str) -> Result<Option<UserAddress>, Error>;
    }
}

mock! {
    CodeRepo {}
    #[async_trait]
    impl InviteCodeRepository for CodeRepo {
        async fn exists_unused(&self, code: &str) -> Result<bool, Error>;
        async fn find_by_code(&self, code: &str) -> Result<Option<InviteCode>, Error>;
        async fn find_first_by_redeemer_address(&self, address: &str) -> Result<Option<InviteCode>, Error>;
        async fn list_unused_codes_by_creator_address(&self, address: &str) -> Result<Vec<String>, Error>;
        async fn bulk_create(&self, codes: &[InviteCode]) -> Result<Vec<InviteCode>, Error>;
        async fn redeem(&self, code: &str, redeemer_id: Uuid) -> Result<Option<InviteCode>, Error>;
    }
}

fn service(addresses: MockAddressRepo, codes: MockCodeRepo) -> InviteService {
    InviteService::new(Arc::new(addresses), Arc::new(codes), CodeGenerator::default())
}

#[tokio::test]
async fn test_generate_surfaces_code_collision() {
    let mut addresses = MockAddressRepo::new();
    addresses
        .expect_get_or_create()
        .with(eq("0xA"))
        .times(1)
        .returning(|a| Ok(UserAddress::new(a)));

    let mut codes = MockCodeRepo::new();
    codes
        .expect_bulk_create()
        .times(1)
        .returning(|batch| Err(Error::DuplicateCode(batch[0].code.clone())));

    let err = service(addresses, codes)
        .generate(2, Some("0xA"), CreatorType::User)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::DuplicateCode(_)));
    assert!(err.is_persistence());
}

#[tokio::test]
async fn test_generate_hands_whole_batch_to_pool() {
    let addresses = MockAddressRepo::new();

    let mut codes = MockCodeRepo::new();
    codes
        .expect_bulk_create()
        .withf(|batch| {
            batch.len() == 4
                && batch.iter().all(|c| !c.is_used && c.creator.is_none())
                && batch.iter().all(|c| c.creator_type == CreatorType::Admin)
        })
        .times(1)
        .returning(|batch| Ok(batch.to_vec()));

    let created = service(addresses, codes)
        .generate(4, None, CreatorType::Admin)
        .await
        .expect("generate should succeed");
    assert_eq!(created.len(), 4);
}

#[tokio::test]
async fn test_activate_missing_code_is_in_band() {
    let redeemer = UserAddress::new("0xB");
    let redeemer_id = redeemer.address_id;

    let mut addresses = MockAddressRepo::new();
    addresses
        .expect_get_or_create()
        .with(eq("0xB"))
        .times(1)
        .returning(move |_| Ok(redeemer.clone()));

    let mut codes = MockCodeRepo::new();
    codes
        .expect_redeem()
        .with(eq("MISSING9"), eq(redeemer_id))
        .times(1)
        .returning(|_, _| Ok(None));

    let outcome = service(addresses, codes)
        .activate("MISSING9", "0xB")
        .await
        .expect("missing code is not an error");
    assert_eq!(outcome, ActivationOutcome::CodeNotFound);
}

#[tokio::test]
async fn test_activate_stops_when_address_registry_fails() {
    let mut addresses = MockAddressRepo::new();
    addresses
        .expect_get_or_create()
        .times(1)
        .returning(|_| Err(Error::Database(sqlx::Error::PoolTimedOut)));

    let mut codes = MockCodeRepo::new();
    codes.expect_redeem().times(0);

    let err = service(addresses, codes)
        .activate("ABCD2345", "0xB")
        .await
        .unwrap_err();
    assert!(err.is_persistence());
}

#[tokio::test]
async fn test_check_code_propagates_storage_error() {
    let addresses = MockAddressRepo::new();
    let mut codes = MockCodeRepo::new();
    codes
        .expect_exists_unused()
        .returning(|_| Err(Error::Database(sqlx::Error::PoolClosed)));

    let err = service(addresses, codes).check_code("ABCD2345").await.unwrap_err();
    assert!(matches!(err, Error::Database(_)));
}
