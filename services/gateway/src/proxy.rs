//! Session-scoped proxy
//!
//! Transaction operations only run for sessions that have selected an
//! account. Upstream results are wrapped together with that account so the
//! caller can render whose transactions it is looking at.

use crate::session::SessionStore;
use crate::upstream::{Upstream, UpstreamError, UpstreamRequest, UpstreamResponse};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use types::account::Account;
use types::ids::{SessionId, SessionIdGenerator};
use types::transaction::SearchQuery;

pub const FIND_BY_USER_PATH: &str = "/transaction/find-by-user";
pub const SEARCH_PATH: &str = "/transaction/search";

/// Page requested when the caller gives none
pub const DEFAULT_PAGE: u32 = 20;

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("No user selected for session")]
    NoSessionSelected,

    #[error("Upstream transport error: {0}")]
    UpstreamTransport(#[from] UpstreamError),

    #[error("Upstream returned an unparseable payload: {0}")]
    UpstreamParse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Upstream transaction listing for the session's account
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionPage {
    pub account: Account,
    pub transactions: Value,
}

/// Upstream search results for the session's account
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults {
    pub account: Account,
    pub results: Value,
}

pub struct SessionProxy {
    sessions: Arc<SessionStore>,
    upstream: Arc<dyn Upstream>,
    ids: SessionIdGenerator,
    call_timeout: Option<Duration>,
}

impl SessionProxy {
    pub fn new(sessions: Arc<SessionStore>, upstream: Arc<dyn Upstream>) -> Self {
        Self {
            sessions,
            upstream,
            ids: SessionIdGenerator::new(),
            call_timeout: None,
        }
    }

    /// Per-call deadline overriding the upstream client's default
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = Some(timeout);
        self
    }

    #[cfg(test)]
    fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Bind `account` to the session, issuing a new id when none is given.
    pub fn select_account(
        &self,
        session: Option<SessionId>,
        account: Account,
    ) -> Result<SessionId, ProxyError> {
        let account = account
            .validate()
            .map_err(|e| ProxyError::InvalidInput(e.to_string()))?;
        let session = session.unwrap_or_else(|| self.ids.next());

        tracing::info!(session = %session, account = account.handle(), "account selected");
        self.sessions.put(session.clone(), account);
        Ok(session)
    }

    pub async fn list_transactions(
        &self,
        session: &SessionId,
        page: Option<u32>,
    ) -> Result<TransactionPage, ProxyError> {
        let account = self.resolve(session)?;
        let page = page.unwrap_or(DEFAULT_PAGE);

        let request = UpstreamRequest::get(FIND_BY_USER_PATH).with_query(format!("p={}", page));
        let transactions = self.fetch_json(request).await?;

        Ok(TransactionPage {
            account,
            transactions,
        })
    }

    pub async fn search_transactions(
        &self,
        session: &SessionId,
        query: &SearchQuery,
    ) -> Result<SearchResults, ProxyError> {
        let account = self.resolve(session)?;
        let body = query
            .to_body()
            .map_err(|e| ProxyError::InvalidInput(e.to_string()))?;

        let results = self.fetch_json(UpstreamRequest::post(SEARCH_PATH, body)).await?;

        Ok(SearchResults { account, results })
    }

    fn resolve(&self, session: &SessionId) -> Result<Account, ProxyError> {
        self.sessions.get(session).ok_or_else(|| {
            tracing::debug!(session = %session, "no account selected for session");
            ProxyError::NoSessionSelected
        })
    }

    async fn fetch_json(&self, mut request: UpstreamRequest) -> Result<Value, ProxyError> {
        if let Some(timeout) = self.call_timeout {
            request = request.with_timeout(timeout);
        }
        let path = request.path.clone();

        let response = self.upstream.call(request).await.map_err(|e| {
            tracing::error!(path = %path, error = %e, "upstream call failed");
            ProxyError::from(e)
        })?;

        if !response.status.is_success() {
            tracing::warn!(
                path = %path,
                status = response.status.as_u16(),
                "upstream returned non-success status"
            );
        }

        parse_object(&response).inspect_err(|e| {
            tracing::error!(path = %path, error = %e, "failed to parse upstream response");
        })
    }
}

/// Upstream payloads must be JSON objects
fn parse_object(response: &UpstreamResponse) -> Result<Value, ProxyError> {
    let value: Value = serde_json::from_slice(&response.body)
        .map_err(|e| ProxyError::UpstreamParse(e.to_string()))?;
    if !value.is_object() {
        return Err(ProxyError::UpstreamParse(format!(
            "expected a JSON object, got {}",
            json_kind(&value)
        )));
    }
    Ok(value)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
