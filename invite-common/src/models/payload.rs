//! Request and response bodies of the `/api/invite` endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::models::invite::{ActivationOutcome, CreatorType, InviteCode};

pub const CODE_NOT_FOUND: &str = "code not found";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckCodeOut {
    pub can_use: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckAddressOut {
    pub is_activated: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ActivateCodeIn {
    pub address: String,
    pub code: String,
}

impl ActivateCodeIn {
    pub fn validate(&self) -> Result<(), Error> {
        if self.address.trim().is_empty() {
            return Err(Error::InvalidInput("address must not be empty".into()));
        }
        if self.code.trim().is_empty() {
            return Err(Error::InvalidInput("code must not be empty".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivateCodeOut {
    pub is_success: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

impl From<&ActivationOutcome> for ActivateCodeOut {
    fn from(outcome: &ActivationOutcome) -> Self {
        match outcome {
            ActivationOutcome::Activated(_) => Self { is_success: true, error: None },
            ActivationOutcome::CodeNotFound => Self {
                is_success: false,
                error: Some(CODE_NOT_FOUND.to_string()),
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateCodeIn {
    #[serde(default)]
    pub address: Option<String>,
    pub code_number: i64,
    pub creator_type: CreatorType,
}

impl GenerateCodeIn {
    /// Returns the requested batch size once it is known to be in `1..=max`.
    pub fn checked_count(&self, max: usize) -> Result<usize, Error> {
        if self.code_number < 1 {
            return Err(Error::InvalidInput(format!(
                "code_number must be positive, got {}",
                self.code_number
            )));
        }
        let count = usize::try_from(self.code_number)
            .map_err(|_| Error::InvalidInput("code_number is too large".into()))?;
        if count > max {
            return Err(Error::InvalidInput(format!(
                "code_number must be at most {max}, got {count}"
            )));
        }
        Ok(count)
    }

    /// Blank addresses mean "no creator".
    pub fn creator_address(&self) -> Option<&str> {
        self.address
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateCodeOut {
    pub address: Option<String>,
    pub code: String,
    pub creator_type: CreatorType,
    pub is_used: bool,
}

impl From<&InviteCode> for GenerateCodeOut {
    fn from(code: &InviteCode) -> Self {
        Self {
            address: code.creator_address().map(str::to_string),
            code: code.code.clone(),
            creator_type: code.creator_type,
            is_used: code.is_used,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InviteCodeDetailOut {
    pub code: String,
    pub creator_address: Option<String>,
    pub creator_type: CreatorType,
    pub is_used: bool,
    pub redeemer_address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&InviteCode> for InviteCodeDetailOut {
    fn from(code: &InviteCode) -> Self {
        Self {
            code: code.code.clone(),
            creator_address: code.creator_address().map(str::to_string),
            creator_type: code.creator_type,
            is_used: code.is_used,
            redeemer_address: code.redeemer_address().map(str::to_string),
            created_at: code.created_at,
            updated_at: code.updated_at,
        }
    }
}
