//! Gateway for the YaYa Wallet API
//!
//! Signs every upstream call with the shared API secret and scopes
//! transaction queries to the account a client session has selected.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod proxy;
pub mod router;
pub mod session;
pub mod signing;
pub mod state;
pub mod upstream;

use config::{ConfigError, GatewayConfig};
use proxy::SessionProxy;
use session::SessionStore;
use state::AppState;
use std::sync::Arc;
use upstream::SignedClient;

/// Wire the signed client, session store and proxy from configuration
pub fn build_state(config: &GatewayConfig) -> Result<AppState, ConfigError> {
    let client = SignedClient::new(
        &config.base_url,
        &config.api_prefix,
        config.api_key.clone(),
        config.secret()?.clone(),
        config.upstream_timeout(),
    )?;
    let proxy = SessionProxy::new(Arc::new(SessionStore::new()), Arc::new(client));
    Ok(AppState::new(proxy))
}
