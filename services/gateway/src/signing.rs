//! HMAC-SHA256 request signing for the YaYa Wallet API.
//!
//! The provider verifies every call by recomputing
//! `base64(HMAC-SHA256(secret, timestamp + method + path + body))`
//! over the exact bytes the gateway sent, so the message must be built
//! without separators and the path must exclude host and query string.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fmt;

type HmacSha256 = Hmac<Sha256>;

/// Shared API secret.
///
/// # Security
/// Never logged: `Debug` and `Display` both print `[REDACTED]`.
#[derive(Clone)]
pub struct ApiSecret(String);

impl ApiSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for ApiSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiSecret([REDACTED])")
    }
}

impl fmt::Display for ApiSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// Compute the request signature.
///
/// # Arguments
/// * `secret` - Shared API secret, used raw as the HMAC key
/// * `timestamp` - Unix seconds as a decimal string
/// * `method` - Uppercase HTTP method
/// * `path` - Request path including the API prefix, without query string
/// * `body` - Raw request body, empty for body-less calls
pub fn sign(secret: &ApiSecret, timestamp: &str, method: &str, path: &str, body: &[u8]) -> String {
    // HMAC accepts keys of any length
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .unwrap_or_else(|_| unreachable!("HMAC-SHA256 accepts any key length"));
    mac.update(timestamp.as_bytes());
    mac.update(method.as_bytes());
    mac.update(path.as_bytes());
    mac.update(body);
    STANDARD.encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const FIND_BY_USER: &str = "/api/en/transaction/find-by-user";

    fn secret() -> ApiSecret {
        ApiSecret::new("s3cr3t")
    }

    #[test]
    fn test_sign_known_vector() {
        let sig = sign(&secret(), "1700000000", "GET", FIND_BY_USER, b"");
        assert_eq!(sig, "wwxdK8D/ZHr3Ttm4o3AYst772iUGSQrWmpO820NQ0MA=");
    }

    #[test]
    fn test_sign_known_vector_with_body() {
        let sig = sign(
            &secret(),
            "1700000000",
            "POST",
            "/api/en/transaction/search",
            br#"{"query":"coffee"}"#,
        );
        assert_eq!(sig, "yer8eA+7nXsCcwePFmv2mMBSXgztHYoTbbEGp/to9Hc=");
    }

    #[test]
    fn test_sign_deterministic() {
        let sig1 = sign(&secret(), "1700000000", "GET", FIND_BY_USER, b"");
        let sig2 = sign(&secret(), "1700000000", "GET", FIND_BY_USER, b"");
        assert_eq!(sig1, sig2, "Same inputs should produce same signature");
    }

    #[test]
    fn test_sign_is_padded_standard_base64() {
        let sig = sign(&secret(), "1700000000", "GET", FIND_BY_USER, b"");
        // 32-byte digest encodes to 44 chars with one pad
        assert_eq!(sig.len(), 44);
        assert!(sig.ends_with('='));
        assert_eq!(STANDARD.decode(&sig).unwrap().len(), 32);
    }

    #[test]
    fn test_sign_different_methods() {
        let sig_get = sign(&secret(), "1700000000", "GET", FIND_BY_USER, b"");
        let sig_post = sign(&secret(), "1700000000", "POST", FIND_BY_USER, b"");
        assert_ne!(sig_get, sig_post);
    }

    #[test]
    fn test_sign_different_secrets() {
        let sig1 = sign(&secret(), "1700000000", "GET", FIND_BY_USER, b"");
        let sig2 = sign(&ApiSecret::new("s3cr3u"), "1700000000", "GET", FIND_BY_USER, b"");
        assert_ne!(sig1, sig2);
    }

    #[test]
    fn test_secret_is_redacted() {
        let secret = secret();
        assert_eq!(format!("{:?}", secret), "ApiSecret([REDACTED])");
        assert_eq!(secret.to_string(), "[REDACTED]");
        assert!(!format!("{:?}", secret).contains("s3cr3t"));
    }

    proptest! {
        #[test]
        fn prop_sign_deterministic(
            key in "[ -~]{0,32}",
            ts in "[0-9]{1,12}",
            path in "/[a-z/-]{0,40}",
            body in proptest::collection::vec(any::<u8>(), 0..64),
        ) {
            let secret = ApiSecret::new(key);
            prop_assert_eq!(
                sign(&secret, &ts, "POST", &path, &body),
                sign(&secret, &ts, "POST", &path, &body)
            );
        }

        #[test]
        fn prop_single_byte_change_changes_signature(
            body in proptest::collection::vec(any::<u8>(), 1..64),
            idx in any::<prop::sample::Index>(),
            flip in 1u8..=255,
        ) {
            let mut altered = body.clone();
            let i = idx.index(altered.len());
            altered[i] ^= flip;
            prop_assert_ne!(
                sign(&secret(), "1700000000", "POST", "/api/en/transaction/search", &body),
                sign(&secret(), "1700000000", "POST", "/api/en/transaction/search", &altered)
            );
        }

        #[test]
        fn prop_timestamp_change_changes_signature(a in 0u64..u64::MAX) {
            let b = a + 1;
            prop_assert_ne!(
                sign(&secret(), &a.to_string(), "GET", FIND_BY_USER, b""),
                sign(&secret(), &b.to_string(), "GET", FIND_BY_USER, b"")
            );
        }
    }
}
