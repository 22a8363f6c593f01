// src/repositories/mod.rs

pub use invite_common::traits::repository_traits::{AddressRepository, InviteCodeRepository};

pub use postgres::address::PostgresAddressRepository;
pub use postgres::invite_code::PostgresInviteCodeRepository;

pub mod postgres;
