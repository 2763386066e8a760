//! Session token codec.
//!
//! Produces and verifies compact, tamper-evident admin session tokens of the
//! form:
//!
//! ```text
//! base64(json-payload) "." base64(hmac-sha256(secret, base64-text))
//! ```
//!
//! The signature covers the base64 *text* of the payload, not its raw bytes.
//! Tokens are persisted verbatim in the session table, so changing this
//! order of operations (or the base64 alphabet) requires a versioned format
//! bump to avoid invalidating stored sessions.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, TimeDelta, Utc};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

use doggiedon_core::AdminId;

type HmacSha256 = Hmac<Sha256>;

/// Fixed session lifetime: `exp = iat + 24h`.
pub const SESSION_TTL_HOURS: i64 = 24;

/// Errors that can occur when verifying a token.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    /// The token is not two non-empty dot-separated parts, or the payload
    /// text cannot be decoded.
    #[error("malformed session token")]
    Malformed,

    /// The HMAC signature does not verify.
    #[error("invalid token signature")]
    BadSignature,

    /// The token's expiry claim is in the past.
    #[error("session token expired")]
    Expired,
}

/// The claims encoded inside a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPayload {
    /// The authenticated admin.
    #[serde(rename = "adminId")]
    pub admin_id: AdminId,
    /// Issue time, unix seconds.
    pub iat: i64,
    /// Expiry time, unix seconds.
    pub exp: i64,
}

/// A freshly minted token together with its expiry instant, ready to be
/// persisted as a session row.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// The encoded bearer token.
    pub token: String,
    /// When the token stops being valid.
    pub expires_at: DateTime<Utc>,
}

/// Encoder/verifier for session tokens.
///
/// The signing secret is injected from configuration at startup; it is never
/// a compile-time constant.
pub struct TokenCodec {
    key: Vec<u8>,
}

impl TokenCodec {
    /// Create a codec signing with the given secret.
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        Self {
            key: secret.expose_secret().as_bytes().to_vec(),
        }
    }

    /// Mint a token for `admin_id`, issued at `now` and expiring
    /// [`SESSION_TTL_HOURS`] later.
    #[must_use]
    pub fn issue(&self, admin_id: AdminId, now: DateTime<Utc>) -> IssuedToken {
        let iat = now.timestamp();
        let exp = iat + SESSION_TTL_HOURS * 3600;
        let payload = TokenPayload { admin_id, iat, exp };

        let token = self.encode(&payload);
        let expires_at = now + TimeDelta::hours(SESSION_TTL_HOURS);

        IssuedToken { token, expires_at }
    }

    /// Encode a payload into its signed wire form.
    #[must_use]
    pub fn encode(&self, payload: &TokenPayload) -> String {
        // TokenPayload serialization cannot fail: plain struct, no maps.
        let json = serde_json::to_vec(payload).expect("token payload serializes");
        let payload_b64 = BASE64.encode(json);
        let signature = self.sign(payload_b64.as_bytes());
        format!("{payload_b64}.{}", BASE64.encode(signature))
    }

    /// Verify a token against the current time.
    ///
    /// # Errors
    ///
    /// - [`TokenError::Malformed`] if the token does not split into exactly
    ///   two non-empty dot-separated parts, or the payload does not decode
    /// - [`TokenError::BadSignature`] if HMAC verification fails
    /// - [`TokenError::Expired`] if the expiry claim is in the past
    pub fn verify(&self, token: &str) -> Result<TokenPayload, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token against an explicit instant.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::verify`], evaluated at `now`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<TokenPayload, TokenError> {
        let mut parts = token.split('.');
        let (Some(payload_b64), Some(signature_b64), None) =
            (parts.next(), parts.next(), parts.next())
        else {
            return Err(TokenError::Malformed);
        };
        if payload_b64.is_empty() || signature_b64.is_empty() {
            return Err(TokenError::Malformed);
        }

        // Signature check first: a tampered signature segment is always
        // BadSignature, even when the tampering broke its base64 encoding.
        let signature = BASE64
            .decode(signature_b64)
            .map_err(|_| TokenError::BadSignature)?;
        let mut mac = self.mac();
        mac.update(payload_b64.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::BadSignature)?;

        // The signature covered the base64 text, so a decode failure here
        // means the token was minted from garbage, not tampered with.
        let json = BASE64
            .decode(payload_b64)
            .map_err(|_| TokenError::Malformed)?;
        let payload: TokenPayload =
            serde_json::from_slice(&json).map_err(|_| TokenError::Malformed)?;

        if payload.exp < now.timestamp() {
            return Err(TokenError::Expired);
        }

        Ok(payload)
    }

    fn sign(&self, data: &[u8]) -> Vec<u8> {
        let mut mac = self.mac();
        mac.update(data);
        mac.finalize().into_bytes().to_vec()
    }

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(&self.key).expect("HMAC accepts any key length")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn codec() -> TokenCodec {
        TokenCodec::new(&SecretString::from(
            "kP9#mX2$vQ7@nR4!jW8%tZ1^bY5&cL3*",
        ))
    }

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_750_000_000, 0).unwrap()
    }

    #[test]
    fn test_roundtrip_while_unexpired() {
        let codec = codec();
        let admin_id = AdminId::generate();
        let issued = codec.issue(admin_id, now());

        let payload = codec.verify_at(&issued.token, now()).unwrap();
        assert_eq!(payload.admin_id, admin_id);
        assert_eq!(payload.exp, payload.iat + SESSION_TTL_HOURS * 3600);
    }

    #[test]
    fn test_expired_after_ttl() {
        let codec = codec();
        let issued = codec.issue(AdminId::generate(), now());

        let after_expiry = now() + TimeDelta::hours(SESSION_TTL_HOURS) + TimeDelta::seconds(1);
        assert_eq!(
            codec.verify_at(&issued.token, after_expiry).unwrap_err(),
            TokenError::Expired
        );
    }

    #[test]
    fn test_valid_at_exact_expiry_instant() {
        // exp < now is expired; exp == now is still accepted
        let codec = codec();
        let issued = codec.issue(AdminId::generate(), now());

        let at_expiry = now() + TimeDelta::hours(SESSION_TTL_HOURS);
        assert!(codec.verify_at(&issued.token, at_expiry).is_ok());
    }

    #[test]
    fn test_tampered_signature_is_bad_signature() {
        let codec = codec();
        let issued = codec.issue(AdminId::generate(), now());

        let (payload, signature) = issued.token.split_once('.').unwrap();
        let mut chars: Vec<char> = signature.chars().collect();
        let first = chars.first_mut().unwrap();
        *first = if *first == 'A' { 'B' } else { 'A' };
        let tampered: String = chars.into_iter().collect();

        assert_eq!(
            codec
                .verify_at(&format!("{payload}.{tampered}"), now())
                .unwrap_err(),
            TokenError::BadSignature
        );
    }

    #[test]
    fn test_non_base64_signature_is_bad_signature() {
        let codec = codec();
        let issued = codec.issue(AdminId::generate(), now());
        let (payload, _) = issued.token.split_once('.').unwrap();

        assert_eq!(
            codec
                .verify_at(&format!("{payload}.!!!not-base64!!!"), now())
                .unwrap_err(),
            TokenError::BadSignature
        );
    }

    #[test]
    fn test_tampered_payload_is_bad_signature() {
        let codec = codec();
        let issued = codec.issue(AdminId::generate(), now());

        let (payload, signature) = issued.token.split_once('.').unwrap();
        let mut chars: Vec<char> = payload.chars().collect();
        let first = chars.first_mut().unwrap();
        *first = if *first == 'A' { 'B' } else { 'A' };
        let tampered: String = chars.into_iter().collect();

        assert_eq!(
            codec
                .verify_at(&format!("{tampered}.{signature}"), now())
                .unwrap_err(),
            TokenError::BadSignature
        );
    }

    #[test]
    fn test_wrong_key_is_bad_signature() {
        let issued = codec().issue(AdminId::generate(), now());

        let other = TokenCodec::new(&SecretString::from(
            "zF6!wD3@qJ9#sG1$hN7%kV4^mB8&xT2*",
        ));
        assert_eq!(
            other.verify_at(&issued.token, now()).unwrap_err(),
            TokenError::BadSignature
        );
    }

    #[test]
    fn test_malformed_shapes() {
        let codec = codec();

        for token in ["", "no-dot-at-all", ".", "onlypayload.", ".onlysignature", "a.b.c"] {
            assert_eq!(
                codec.verify_at(token, now()).unwrap_err(),
                TokenError::Malformed,
                "token {token:?} should be malformed"
            );
        }
    }

    #[test]
    fn test_signed_garbage_payload_is_malformed() {
        // Correctly signed, but the payload text is not base64 JSON.
        let codec = codec();
        let payload_b64 = "not_base64_json!";
        let signature = BASE64.encode(codec.sign(payload_b64.as_bytes()));

        assert_eq!(
            codec
                .verify_at(&format!("{payload_b64}.{signature}"), now())
                .unwrap_err(),
            TokenError::Malformed
        );
    }

    #[test]
    fn test_signature_covers_base64_text() {
        // Re-deriving the signature from the base64 text reproduces the
        // token exactly; this pins the order of operations.
        let codec = codec();
        let issued = codec.issue(AdminId::generate(), now());

        let (payload_b64, signature_b64) = issued.token.split_once('.').unwrap();
        let expected = BASE64.encode(codec.sign(payload_b64.as_bytes()));
        assert_eq!(signature_b64, expected);
    }

    #[test]
    fn test_payload_wire_field_names() {
        let payload = TokenPayload {
            admin_id: AdminId::new(uuid::Uuid::nil()),
            iat: 100,
            exp: 200,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("adminId").is_some());
        assert!(json.get("iat").is_some());
        assert!(json.get("exp").is_some());
    }
}
