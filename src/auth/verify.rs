//! Telegram Login Widget assertion verification.
//!
//! The widget redirects back with the user's fields plus `hash`, the
//! hex HMAC-SHA256 of the sorted `key=value` lines keyed by SHA-256 of the
//! bot token. See <https://core.telegram.org/widgets/login#checking-authorization>.

use crate::models::VerifiedIdentity;
use hmac::digest::InvalidLength;
use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use std::time::{SystemTime, UNIX_EPOCH};
use zeroize::Zeroizing;

type HmacSha256 = Hmac<Sha256>;

/// Assertions older than this are rejected. Exactly this old is still valid.
pub const AUTH_MAX_AGE_SECS: i64 = 86_400;

const SIGNATURE_FIELD: &str = "hash";

/// Fields added by our own login flow; never signed by Telegram.
const TRANSPORT_FIELDS: &[&str] = &["redirect_to"];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("assertion has no hash")]
    MissingSignature,

    #[error("assertion hash does not match")]
    SignatureMismatch,

    #[error("assertion is {age_secs}s old")]
    AssertionExpired { age_secs: i64 },

    #[error("assertion id is not a Telegram user ID")]
    MalformedIdentity,
}

/// HMAC key derived from the bot token: `SHA-256(token)`.
pub struct BotSecret {
    key: Zeroizing<[u8; 32]>,
}

impl BotSecret {
    pub fn derive(bot_token: &str) -> Self {
        let digest = Sha256::digest(bot_token.as_bytes());
        let mut key = Zeroizing::new([0u8; 32]);
        key.copy_from_slice(&digest);
        Self { key }
    }

    fn mac(&self, check_string: &str) -> Result<HmacSha256, InvalidLength> {
        let mut mac = <HmacSha256 as KeyInit>::new_from_slice(&self.key[..])?;
        mac.update(check_string.as_bytes());
        Ok(mac)
    }

    /// Lowercase hex HMAC-SHA256 of `check_string`.
    pub fn sign(&self, check_string: &str) -> String {
        // HMAC takes keys of any length, so keying cannot fail
        self.mac(check_string)
            .map(|mac| hex::encode(mac.finalize().into_bytes()))
            .unwrap_or_default()
    }

    /// Constant-time check of a lowercase hex signature.
    fn verify(&self, check_string: &str, signature: &str) -> bool {
        let lowercase_hex = signature
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        if !lowercase_hex {
            return false;
        }
        let Ok(expected) = hex::decode(signature) else {
            return false;
        };

        self.mac(check_string)
            .is_ok_and(|mac| mac.verify_slice(&expected).is_ok())
    }
}

impl std::fmt::Debug for BotSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BotSecret([REDACTED])")
    }
}

/// A login assertion as received from the widget redirect.
#[derive(Debug, Clone)]
pub struct LoginAssertion {
    hash: Option<String>,
    auth_date: i64,
    /// Every signed field, verbatim.
    fields: Vec<(String, String)>,
}

impl LoginAssertion {
    /// Build from raw query fields. `hash` and transport-only fields are set
    /// aside; everything else is kept for the check-string.
    pub fn from_fields<I>(raw: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut hash = None;
        let mut fields = Vec::new();

        for (key, value) in raw {
            if key == SIGNATURE_FIELD {
                hash = Some(value);
            } else if !TRANSPORT_FIELDS.contains(&key.as_str()) {
                fields.push((key, value));
            }
        }

        // Missing or non-numeric auth_date is 0, which is always stale
        let auth_date = fields
            .iter()
            .find(|(k, _)| k == "auth_date")
            .and_then(|(_, v)| v.trim().parse::<i64>().ok())
            .unwrap_or(0);

        Self {
            hash,
            auth_date,
            fields,
        }
    }

    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn auth_date(&self) -> i64 {
        self.auth_date
    }

    /// `key=value` lines sorted by the full line, joined with `\n`.
    pub fn check_string(&self) -> String {
        let mut lines: Vec<String> = self
            .fields
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        lines.sort();
        lines.join("\n")
    }
}

/// Verify an assertion against the bot secret at the current time.
pub fn verify(assertion: &LoginAssertion, secret: &BotSecret) -> Result<VerifiedIdentity, AuthError> {
    verify_at(assertion, secret, unix_now())
}

/// Verify an assertion as of `now` (Unix seconds).
///
/// Signature first, then freshness, then identity.
pub fn verify_at(
    assertion: &LoginAssertion,
    secret: &BotSecret,
    now: i64,
) -> Result<VerifiedIdentity, AuthError> {
    let hash = match assertion.hash.as_deref() {
        Some(h) if !h.is_empty() => h,
        _ => return Err(AuthError::MissingSignature),
    };

    let check_string = assertion.check_string();
    if !secret.verify(&check_string, hash) {
        tracing::debug!(received = %hash, check_string = %check_string, "Login assertion signature mismatch");
        return Err(AuthError::SignatureMismatch);
    }

    let age_secs = now.saturating_sub(assertion.auth_date);
    if age_secs > AUTH_MAX_AGE_SECS {
        return Err(AuthError::AssertionExpired { age_secs });
    }

    let user_id = assertion
        .field("id")
        .and_then(|id| id.parse::<i64>().ok())
        .ok_or(AuthError::MalformedIdentity)?;

    Ok(VerifiedIdentity {
        user_id,
        first_name: assertion.field("first_name").map(str::to_string),
        username: assertion.field("username").map(str::to_string),
    })
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
