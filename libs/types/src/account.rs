//! Account display identity
//!
//! An `Account` names the wallet holder whose transactions a session is
//! scoped to. Accounts are immutable once built and are never persisted:
//! they come from the fixed [`directory`] or from a client selection payload.

use crate::errors::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wallet holder identity (display name + account handle)
///
/// Serialized with lowercase keys. Deserialization also accepts the
/// capitalized `Name`/`Account` keys used by existing frontends.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Account {
    #[serde(alias = "Name", default)]
    name: String,
    #[serde(alias = "Account")]
    account: String,
}

impl Account {
    /// Create an account, rejecting a blank handle
    pub fn new(name: impl Into<String>, account: impl Into<String>) -> Result<Self, ValidationError> {
        let account = account.into();
        if account.trim().is_empty() {
            return Err(ValidationError::EmptyAccountHandle);
        }
        Ok(Self {
            name: name.into(),
            account,
        })
    }

    /// Display name of the holder
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Provider-side account handle
    pub fn handle(&self) -> &str {
        &self.account
    }

    /// Re-check invariants on a value that arrived through deserialization
    pub fn validate(self) -> Result<Self, ValidationError> {
        Self::new(self.name, self.account)
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (@{})", self.name, self.account)
    }
}

/// Accounts offered to clients for selection
const DIRECTORY: [(&str, &str); 4] = [
    ("Yaya Wallet Pii", "yayawalletpi"),
    ("YaYa PII SC", "antenehgebey"),
    ("Habetamu Worku Feleke", "tewobstatewo"),
    ("Surafel Araya", "surafelaraya"),
];

/// The fixed directory of selectable accounts
pub fn directory() -> Vec<Account> {
    DIRECTORY
        .iter()
        .map(|(name, account)| Account {
            name: (*name).to_string(),
            account: (*account).to_string(),
        })
        .collect()
}
