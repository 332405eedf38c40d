use crate::signing::ApiSecret;
use crate::upstream::UpstreamError;
use clap::Parser;
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;
use thiserror::Error;

/// Listen port when neither BIND_ADDRESS nor PORT is set
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAYA_BASE_URL must be an http(s) URL")]
    InvalidBaseUrl,

    #[error("YAYA_API_KEY and YAYA_API_SECRET environment variables are required")]
    MissingCredentials,

    #[error("UPSTREAM_TIMEOUT_SECS must be greater than zero")]
    ZeroTimeout,

    #[error("failed to build upstream client: {0}")]
    Client(#[from] UpstreamError),
}

/// Gateway settings, read from flags or the environment
///
/// A `.env` file is loaded into the environment before parsing (see
/// [`GatewayConfig::load`]).
#[derive(Parser, Debug, Clone)]
#[command(name = "gateway")]
#[command(about = "Signing, session-scoped gateway for the YaYa Wallet API", long_about = None)]
pub struct GatewayConfig {
    /// Provider base URL, e.g. https://sandbox.yayawallet.com
    #[arg(long, env = "YAYA_BASE_URL")]
    pub base_url: String,

    /// Provider API key identifier
    #[arg(long, env = "YAYA_API_KEY")]
    pub api_key: String,

    /// Shared secret used to sign upstream requests
    #[arg(long, env = "YAYA_API_SECRET", hide_env_values = true, value_parser = parse_secret)]
    pub api_secret: Option<ApiSecret>,

    /// Older name for the signing secret; used when YAYA_API_SECRET is unset
    #[arg(long, env = "YAYA_API_SIGN", hide = true, hide_env_values = true, value_parser = parse_secret)]
    pub api_sign: Option<ApiSecret>,

    /// Static path prefix of the provider API; part of the signed path
    #[arg(long, default_value = "/api/en", env = "YAYA_API_PREFIX")]
    pub api_prefix: String,

    /// Bind address for the HTTP listener
    #[arg(short, long, env = "BIND_ADDRESS")]
    pub bind: Option<SocketAddr>,

    /// Port on all interfaces; ignored when a bind address is given
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Upstream request timeout in seconds
    #[arg(long, default_value_t = 30, env = "UPSTREAM_TIMEOUT_SECS")]
    pub upstream_timeout_secs: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", env = "LOG_LEVEL")]
    pub log_level: String,

    /// Enable JSON logging
    #[arg(long, env = "JSON_LOGS")]
    pub json_logs: bool,
}

fn parse_secret(raw: &str) -> Result<ApiSecret, String> {
    Ok(ApiSecret::new(raw))
}

impl GatewayConfig {
    /// Load `.env` (if present) into the environment, then parse.
    ///
    /// Variables already set in the process environment win over `.env`.
    pub fn load() -> Self {
        // A missing .env is the normal case in containers
        dotenvy::dotenv().ok();
        Self::parse()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingCredentials);
        }
        self.secret()?;
        let url = self.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl);
        }
        if self.upstream_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }

    /// Signing secret: YAYA_API_SECRET, falling back to YAYA_API_SIGN
    pub fn secret(&self) -> Result<&ApiSecret, ConfigError> {
        [self.api_secret.as_ref(), self.api_sign.as_ref()]
            .into_iter()
            .flatten()
            .find(|secret| !secret.is_blank())
            .ok_or(ConfigError::MissingCredentials)
    }

    /// BIND_ADDRESS, else 0.0.0.0:PORT, else 0.0.0.0:8080
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind.unwrap_or_else(|| {
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port.unwrap_or(DEFAULT_PORT)))
        })
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> GatewayConfig {
        let mut argv = vec!["gateway"];
        argv.extend_from_slice(args);
        GatewayConfig::try_parse_from(argv).unwrap()
    }

    fn base_args() -> Vec<&'static str> {
        vec![
            "--base-url",
            "https://sandbox.yayawallet.com",
            "--api-key",
            "key-1",
            "--api-secret",
            "s3cr3t",
        ]
    }

    fn without_secret() -> Vec<&'static str> {
        base_args()[..4].to_vec()
    }

    #[test]
    fn test_defaults() {
        let config = parse(&base_args());
        assert_eq!(config.api_prefix, "/api/en");
        assert_eq!(config.bind_addr(), "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.upstream_timeout(), Duration::from_secs(30));
        assert_eq!(config.log_level, "info");
        assert!(!config.json_logs);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_debug_output_redacts_secret() {
        let config = parse(&base_args());
        let debug = format!("{:?}", config);
        assert!(!debug.contains("s3cr3t"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_blank_secret_rejected() {
        let mut args = base_args();
        args[5] = "  ";
        assert!(matches!(
            parse(&args).validate(),
            Err(ConfigError::MissingCredentials)
        ));
    }

    #[test]
    fn test_legacy_secret_name_accepted() {
        let mut args = without_secret();
        args.extend_from_slice(&["--api-sign", "legacy"]);
        let config = parse(&args);
        assert!(config.validate().is_ok());

        let expected = crate::signing::sign(&ApiSecret::new("legacy"), "1", "GET", "/", b"");
        let actual = crate::signing::sign(config.secret().unwrap(), "1", "GET", "/", b"");
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_primary_secret_wins_over_legacy() {
        let mut args = base_args();
        args.extend_from_slice(&["--api-sign", "legacy"]);
        let config = parse(&args);

        let expected = crate::signing::sign(&ApiSecret::new("s3cr3t"), "1", "GET", "/", b"");
        let actual = crate::signing::sign(config.secret().unwrap(), "1", "GET", "/", b"");
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_missing_secret_rejected() {
        let config = parse(&without_secret());
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingCredentials)
        ));
    }

    #[test]
    fn test_port_used_without_bind_address() {
        let mut args = base_args();
        args.extend_from_slice(&["--port", "9090"]);
        assert_eq!(parse(&args).bind_addr(), "0.0.0.0:9090".parse().unwrap());
    }

    #[test]
    fn test_bind_address_wins_over_port() {
        let mut args = base_args();
        args.extend_from_slice(&["--port", "9090", "--bind", "127.0.0.1:7000"]);
        assert_eq!(parse(&args).bind_addr(), "127.0.0.1:7000".parse().unwrap());
    }

    #[test]
    fn test_base_url_must_be_http() {
        let mut args = base_args();
        args[1] = "sandbox.yayawallet.com";
        assert!(matches!(
            parse(&args).validate(),
            Err(ConfigError::InvalidBaseUrl)
        ));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut args = base_args();
        args.extend_from_slice(&["--upstream-timeout-secs", "0"]);
        assert!(matches!(
            parse(&args).validate(),
            Err(ConfigError::ZeroTimeout)
        ));
    }
}
