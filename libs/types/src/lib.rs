//! Types library for the wallet gateway
//!
//! Shared definitions used by the gateway service. Nothing in here performs
//! I/O; the types are safe to construct and compare from any thread.
//!
//! # Modules
//! - `account`: Account display identity and the fixed account directory
//! - `ids`: Session identifiers and their generator
//! - `transaction`: Transaction search payloads
//! - `errors`: Validation error taxonomy

pub mod account;
pub mod errors;
pub mod ids;
pub mod transaction;
