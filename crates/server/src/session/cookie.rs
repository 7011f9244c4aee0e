//! Authentication cookie codec.
//!
//! The cookie value is `base64url(json(SessionContext)) + "." +
//! base64url(hmac_sha256(payload))`, keyed by the configured auth secret.
//! Verification is constant time via `Mac::verify_slice`. Any decode
//! failure means "no session", never an error page.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use thiserror::Error;

use super::SessionContext;

type HmacSha256 = Hmac<Sha256>;

/// Name of the authentication cookie.
pub const AUTH_COOKIE_NAME: &str = "foodwaste_auth";

/// Why a cookie value failed to decode.
///
/// Callers treat every variant identically (no session); the distinction
/// exists for trace logging only.
#[derive(Debug, Error)]
pub enum CookieDecodeError {
    #[error("cookie value has no signature separator")]
    MissingSignature,
    #[error("cookie payload or signature is not valid base64")]
    Base64,
    #[error("cookie signature does not verify")]
    BadSignature,
    #[error("cookie payload is not a valid session context")]
    Payload,
}

/// Signs and verifies authentication cookie values.
#[derive(Clone)]
pub struct AuthCookieCodec {
    key: SecretString,
}

impl AuthCookieCodec {
    /// Create a codec keyed by the auth secret.
    #[must_use]
    pub const fn new(key: SecretString) -> Self {
        Self { key }
    }

    fn mac(&self) -> HmacSha256 {
        // HMAC accepts keys of any length
        #[allow(clippy::expect_used)]
        HmacSha256::new_from_slice(self.key.expose_secret().as_bytes())
            .expect("HMAC accepts any key length")
    }

    /// Encode a session context into a cookie value.
    #[must_use]
    pub fn encode(&self, context: &SessionContext) -> String {
        // SessionContext serialization cannot fail: no maps with non-string
        // keys, no non-finite floats
        let json = serde_json::to_vec(context).unwrap_or_default();
        let payload = URL_SAFE_NO_PAD.encode(json);

        let mut mac = self.mac();
        mac.update(payload.as_bytes());
        let tag = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        format!("{payload}.{tag}")
    }

    /// Decode and verify a cookie value.
    ///
    /// # Errors
    ///
    /// Returns a [`CookieDecodeError`] when the value is malformed, the
    /// signature does not verify, or the payload does not parse.
    pub fn decode(&self, value: &str) -> Result<SessionContext, CookieDecodeError> {
        let (payload, tag) = value
            .split_once('.')
            .ok_or(CookieDecodeError::MissingSignature)?;

        let tag_bytes = URL_SAFE_NO_PAD
            .decode(tag)
            .map_err(|_| CookieDecodeError::Base64)?;

        let mut mac = self.mac();
        mac.update(payload.as_bytes());
        mac.verify_slice(&tag_bytes)
            .map_err(|_| CookieDecodeError::BadSignature)?;

        let json = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|_| CookieDecodeError::Base64)?;

        serde_json::from_slice(&json).map_err(|_| CookieDecodeError::Payload)
    }

    /// Build the `Set-Cookie` header value issuing `context`.
    #[must_use]
    pub fn issue_header(&self, context: &SessionContext) -> String {
        format!(
            "{AUTH_COOKIE_NAME}={}; Path=/; HttpOnly; SameSite=Lax",
            self.encode(context)
        )
    }

    /// Build the `Set-Cookie` header value expiring the cookie.
    #[must_use]
    pub fn clear_header(&self) -> String {
        format!("{AUTH_COOKIE_NAME}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
    }
}

/// Extract the auth cookie value from a `Cookie` request header.
#[must_use]
pub fn cookie_value(header: &str) -> Option<&str> {
    header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == AUTH_COOKIE_NAME).then_some(value)
    })
}
