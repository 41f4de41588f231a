//! Signed, expiring bearer tokens.
//!
//! A token is `base64url(payload) "." hex(hmac)` where the payload is
//! `"<user_id>:<expiry_unix_secs>"` and the MAC is HMAC-SHA256 over the
//! payload with the configured signing secret. Verification is
//! constant-time via [`Mac::verify_slice`]. There is no sentinel token:
//! every credential goes through the same signature and expiry checks.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use thiserror::Error;

use namo_core::UserId;

type HmacSha256 = Hmac<Sha256>;

/// Why a token failed verification.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// Not structurally a token.
    #[error("malformed token")]
    Malformed,
    /// The signature doesn't match the payload.
    #[error("bad token signature")]
    BadSignature,
    /// The token's expiry has passed.
    #[error("token expired")]
    Expired,
}

/// Verified contents of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenClaims {
    pub user_id: UserId,
    /// Expiry as unix seconds.
    pub expires_at: i64,
}

/// Issue a token for a user, valid for `ttl_secs` from now.
#[must_use]
pub fn issue(user_id: UserId, ttl_secs: i64, secret: &SecretString) -> String {
    sign(user_id, Utc::now().timestamp() + ttl_secs, secret)
}

/// Verify a token against the signing secret and the current time.
///
/// # Errors
///
/// Returns a [`TokenError`] describing why the token was rejected.
pub fn verify(token: &str, secret: &SecretString) -> Result<TokenClaims, TokenError> {
    verify_at(token, secret, Utc::now().timestamp())
}

fn sign(user_id: UserId, expires_at: i64, secret: &SecretString) -> String {
    let payload = format!("{}:{expires_at}", user_id.as_i64());
    let mut mac = mac_for(secret);
    mac.update(payload.as_bytes());
    let signature = hex::encode(mac.finalize().into_bytes());
    format!("{}.{signature}", URL_SAFE_NO_PAD.encode(payload.as_bytes()))
}

fn verify_at(token: &str, secret: &SecretString, now: i64) -> Result<TokenClaims, TokenError> {
    let (payload_b64, signature_hex) = token.split_once('.').ok_or(TokenError::Malformed)?;

    let payload = URL_SAFE_NO_PAD
        .decode(payload_b64)
        .map_err(|_| TokenError::Malformed)?;
    let signature = hex::decode(signature_hex).map_err(|_| TokenError::Malformed)?;

    let mut mac = mac_for(secret);
    mac.update(&payload);
    mac.verify_slice(&signature)
        .map_err(|_| TokenError::BadSignature)?;

    let payload = std::str::from_utf8(&payload).map_err(|_| TokenError::Malformed)?;
    let (user_id, expires_at) = payload.split_once(':').ok_or(TokenError::Malformed)?;
    let user_id = user_id
        .parse::<i64>()
        .map(UserId::new)
        .map_err(|_| TokenError::Malformed)?;
    let expires_at = expires_at
        .parse::<i64>()
        .map_err(|_| TokenError::Malformed)?;

    if now >= expires_at {
        return Err(TokenError::Expired);
    }

    Ok(TokenClaims {
        user_id,
        expires_at,
    })
}

fn mac_for(secret: &SecretString) -> HmacSha256 {
    // HMAC accepts keys of any length, so this cannot fail.
    HmacSha256::new_from_slice(secret.expose_secret().as_bytes())
        .unwrap_or_else(|_| unreachable!("HMAC accepts any key length"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn secret() -> SecretString {
        SecretString::from("kP8#vN2$wQ5@xR7!yT0%zU3^aV6&bW9*")
    }

    #[test]
    fn test_issue_and_verify() {
        let token = issue(UserId::new(42), 3600, &secret());
        let claims = verify(&token, &secret()).unwrap();
        assert_eq!(claims.user_id, UserId::new(42));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = issue(UserId::new(1), 3600, &secret());
        let other = SecretString::from("qL4!mJ7@nH1#pG5$rF8%sD2^tC6&uB0*");
        assert_eq!(verify(&token, &other), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let token = issue(UserId::new(1), 3600, &secret());
        let (_, signature) = token.split_once('.').unwrap();
        let forged_payload = URL_SAFE_NO_PAD.encode(b"999:9999999999");
        let forged = format!("{forged_payload}.{signature}");
        assert_eq!(verify(&forged, &secret()), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_expired_rejected() {
        let token = sign(UserId::new(1), 1_000, &secret());
        assert_eq!(
            verify_at(&token, &secret(), 1_000),
            Err(TokenError::Expired)
        );
        assert!(verify_at(&token, &secret(), 999).is_ok());
    }

    #[test]
    fn test_garbage_rejected() {
        for garbage in ["", "no-dot", "a.b", "!!!.???"] {
            assert_eq!(
                verify(garbage, &secret()),
                Err(TokenError::Malformed),
                "{garbage}"
            );
        }
    }
}
