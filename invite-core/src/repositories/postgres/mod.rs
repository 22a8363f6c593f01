// src/repositories/postgres/mod.rs

pub mod address;
pub mod invite_code;

pub use address::PostgresAddressRepository;
pub use invite_code::PostgresInviteCodeRepository;
