use serde::{Deserialize, Serialize};
use types::ids::SessionId;

#[derive(Debug, Clone, Deserialize)]
pub struct TransactionsQuery {
    /// Page number; kept as text so a bad value maps to our own error
    pub p: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SelectAccountResponse {
    pub session_id: SessionId,
    pub message: String,
}
