//! Error types for the wallet domain types
//!
//! Raised when a caller-supplied value cannot form a valid domain object.

use thiserror::Error;

/// Validation failures for inbound domain values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Account handle must not be empty")]
    EmptyAccountHandle,
}
