//! Signed Bearer Tokens
//!
//! Stateless auth tokens: a base64url JSON claims payload signed with
//! HMAC-SHA256. The server keeps no session state; identity travels in
//! the token and is verified on every request.
//!
//! Token layout: `base64url(claims_json) + "." + base64url(hmac)`

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Token verification errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Token is not structurally valid or the signature does not match
    #[error("Invalid token")]
    Invalid,

    /// Token signature is valid but the expiry has passed
    #[error("Token has expired")]
    Expired,
}

/// Claims carried inside a signed token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,
    /// Role code ("USER" / "ADMIN")
    pub role: String,
    /// Expiry as epoch milliseconds
    pub exp_ms: i64,
}

impl Claims {
    pub fn is_expired(&self, now_ms: i64) -> bool {
        self.exp_ms <= now_ms
    }
}

/// Issues and verifies HMAC-SHA256 signed tokens
#[derive(Clone)]
pub struct TokenSigner {
    secret: [u8; 32],
}

impl TokenSigner {
    pub fn new(secret: [u8; 32]) -> Self {
        Self { secret }
    }

    /// Sign claims into a bearer token
    pub fn issue(&self, claims: &Claims) -> String {
        // Claims are a flat struct; serialization cannot fail
        let payload_json = serde_json::to_vec(claims).unwrap_or_default();
        let payload = URL_SAFE_NO_PAD.encode(payload_json);
        let signature = self.sign(payload.as_bytes());

        format!("{}.{}", payload, URL_SAFE_NO_PAD.encode(signature))
    }

    /// Verify a token's signature and expiry, returning its claims
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let (payload, signature_b64) = token.split_once('.').ok_or(TokenError::Invalid)?;

        let signature = URL_SAFE_NO_PAD
            .decode(signature_b64)
            .map_err(|_| TokenError::Invalid)?;

        // Constant-time comparison via hmac's verify_slice
        let mut mac = HmacSha256::new_from_slice(&self.secret).expect("HMAC accepts any key size");
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature).map_err(|_| TokenError::Invalid)?;

        let payload_json = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|_| TokenError::Invalid)?;
        let claims: Claims =
            serde_json::from_slice(&payload_json).map_err(|_| TokenError::Invalid)?;

        if claims.is_expired(Utc::now().timestamp_millis()) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    fn sign(&self, data: &[u8]) -> [u8; 32] {
        let mut mac = HmacSha256::new_from_slice(&self.secret).expect("HMAC accepts any key size");
        mac.update(data);
        mac.finalize().into_bytes().into()
    }
}

/// Generate a random 32-byte signing secret
pub fn random_secret() -> [u8; 32] {
    use rand::RngCore;
    let mut secret = [0u8; 32];
    rand::rngs::OsRng.fill_bytes(&mut secret);
    secret
}
