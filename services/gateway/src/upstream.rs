//! Upstream client for the YaYa Wallet API.
//!
//! Every call gets a fresh timestamp and signature. Non-2xx responses are
//! returned to the caller as-is; only transport failures are errors here.

use crate::signing::{ApiSecret, sign};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, StatusCode};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use thiserror::Error;

pub const API_KEY_HEADER: &str = "yaya-api-key";
pub const TIMESTAMP_HEADER: &str = "yaya-api-timestamp";
pub const SIGNATURE_HEADER: &str = "yaya-api-sign";

/// Transport-level failures. Never carries header values or the secret.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("upstream request timed out")]
    Timeout,

    #[error("could not connect to upstream: {0}")]
    Connect(String),

    #[error("failed to read upstream response: {0}")]
    Body(String),

    #[error("invalid upstream request: {0}")]
    InvalidRequest(String),
}

impl UpstreamError {
    fn from_reqwest(err: reqwest::Error) -> Self {
        // Strip the URL so query parameters never end up in logs
        let err = err.without_url();
        if err.is_timeout() {
            UpstreamError::Timeout
        } else if err.is_body() || err.is_decode() {
            UpstreamError::Body(err.to_string())
        } else if err.is_builder() {
            UpstreamError::InvalidRequest(err.to_string())
        } else {
            UpstreamError::Connect(err.to_string())
        }
    }
}

/// One unit of upstream work
#[derive(Debug, Clone)]
pub struct UpstreamRequest {
    pub method: Method,
    /// Endpoint path below the API prefix, e.g. `/transaction/search`
    pub path: String,
    /// Raw query string without the leading `?`
    pub query: Option<String>,
    pub body: Option<Vec<u8>>,
    /// Overrides the client-wide timeout for this call
    pub timeout: Option<Duration>,
}

impl UpstreamRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            query: None,
            body: None,
            timeout: None,
        }
    }

    pub fn post(path: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            query: None,
            body: Some(body),
            timeout: None,
        }
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        let query = query.into();
        self.query = (!query.is_empty()).then_some(query);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Whatever the provider answered
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Seam between the proxy and the wire
#[async_trait]
pub trait Upstream: Send + Sync {
    async fn call(&self, request: UpstreamRequest) -> Result<UpstreamResponse, UpstreamError>;
}

/// Signing HTTP client backed by one pooled `reqwest::Client`
#[derive(Clone)]
pub struct SignedClient {
    http: Client,
    base_url: String,
    api_prefix: String,
    api_key: String,
    secret: ApiSecret,
}

impl SignedClient {
    pub fn new(
        base_url: &str,
        api_prefix: &str,
        api_key: impl Into<String>,
        secret: ApiSecret,
        timeout: Duration,
    ) -> Result<Self, UpstreamError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(UpstreamError::from_reqwest)?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_prefix: normalize_prefix(api_prefix),
            api_key: api_key.into(),
            secret,
        })
    }

    /// Path as signed and sent: prefix + endpoint, no query string
    pub fn signed_path(&self, path: &str) -> String {
        format!("{}{}", self.api_prefix, path)
    }

    fn url(&self, signed_path: &str, query: Option<&str>) -> String {
        match query {
            Some(q) => format!("{}{}?{}", self.base_url, signed_path, q),
            None => format!("{}{}", self.base_url, signed_path),
        }
    }
}

fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_end_matches('/');
    if trimmed.is_empty() || trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

/// Current Unix time in whole seconds
pub fn unix_timestamp() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
        .to_string()
}

#[async_trait]
impl Upstream for SignedClient {
    async fn call(&self, request: UpstreamRequest) -> Result<UpstreamResponse, UpstreamError> {
        let path = self.signed_path(&request.path);
        let url = self.url(&path, request.query.as_deref());
        let body = request.body.unwrap_or_default();

        let timestamp = unix_timestamp();
        let signature = sign(&self.secret, &timestamp, request.method.as_str(), &path, &body);

        let mut headers = HeaderMap::new();
        headers.insert(
            API_KEY_HEADER,
            HeaderValue::from_str(&self.api_key)
                .map_err(|_| UpstreamError::InvalidRequest("API key is not a valid header value".into()))?,
        );
        headers.insert(
            TIMESTAMP_HEADER,
            HeaderValue::from_str(&timestamp)
                .map_err(|_| UpstreamError::InvalidRequest("bad timestamp".into()))?,
        );
        headers.insert(
            SIGNATURE_HEADER,
            HeaderValue::from_str(&signature)
                .map_err(|_| UpstreamError::InvalidRequest("bad signature".into()))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = self
            .http
            .request(request.method.clone(), &url)
            .headers(headers);
        if !body.is_empty() {
            builder = builder.body(body);
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let started = Instant::now();
        let response = builder.send().await.map_err(UpstreamError::from_reqwest)?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(UpstreamError::from_reqwest)?;

        tracing::debug!(
            method = %request.method,
            path = %path,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "upstream call completed"
        );

        Ok(UpstreamResponse {
            status,
            headers,
            body,
        })
    }
}
