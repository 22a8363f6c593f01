// File: invite-common/src/models/invite.rs

use std::fmt;
use std::str::FromStr;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::address::UserAddress;

/// Why a batch of codes was generated. Stored as lowercase TEXT.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CreatorType {
    System,
    User,
    Admin,
    Campaign,
}

impl CreatorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CreatorType::System => "system",
            CreatorType::User => "user",
            CreatorType::Admin => "admin",
            CreatorType::Campaign => "campaign",
        }
    }
}

impl fmt::Display for CreatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CreatorType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "system" => Ok(CreatorType::System),
            "user" => Ok(CreatorType::User),
            "admin" => Ok(CreatorType::Admin),
            "campaign" => Ok(CreatorType::Campaign),
            _ => Err(format!("Unknown creator type: {}", s)),
        }
    }
}

/// One invitation code.
///
/// `is_used` is true exactly when `redeemer` is set, and never goes back to false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InviteCode {
    pub invite_code_id: Uuid,
    pub code: String,
    pub creator: Option<UserAddress>,
    pub creator_type: CreatorType,
    pub is_used: bool,
    pub redeemer: Option<UserAddress>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InviteCode {
    pub fn new(code: &str, creator: Option<UserAddress>, creator_type: CreatorType) -> Self {
        let now = Utc::now();
        Self {
            invite_code_id: Uuid::new_v4(),
            code: code.to_string(),
            creator,
            creator_type,
            is_used: false,
            redeemer: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn creator_address(&self) -> Option<&str> {
        self.creator.as_ref().map(|a| a.address.as_str())
    }

    pub fn redeemer_address(&self) -> Option<&str> {
        self.redeemer.as_ref().map(|a| a.address.as_str())
    }

    /// Binds the code to `redeemer`. An existing redeemer is overwritten.
    pub fn redeem(&mut self, redeemer: UserAddress) {
        self.redeemer = Some(redeemer);
        self.is_used = true;
        self.updated_at = Utc::now();
    }
}

/// Result of an activation attempt. A missing code is an in-band outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationOutcome {
    Activated(InviteCode),
    CodeNotFound,
}

/// What the pool knows about an address as a redeemer.
///
/// `NeverRedeemed` and `Redeemed { is_used: false }` both read as "not activated"
/// over HTTP, but the second one means a row broke the used/redeemer invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressActivation {
    NeverRedeemed,
    Redeemed { is_used: bool },
}

impl AddressActivation {
    pub fn is_activated(&self) -> bool {
        matches!(self, AddressActivation::Redeemed { is_used: true })
    }
}
