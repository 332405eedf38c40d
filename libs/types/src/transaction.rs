//! Transaction search payloads

use serde::{Deserialize, Serialize};

/// Free-text transaction search, sent upstream verbatim as `{"query": ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub query: String,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self { query: query.into() }
    }

    /// Upstream request body bytes
    pub fn to_body(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}
