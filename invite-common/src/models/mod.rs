pub mod address;
pub mod invite;
pub mod payload;

pub use address::UserAddress;
pub use invite::{ActivationOutcome, AddressActivation, CreatorType, InviteCode};
