use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::error::VerifyError;

/// Seconds since the Unix epoch
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// JWT Claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account ID)
    pub sub: String,
    /// Account email at issuance time
    pub email: String,
    /// Issued at (as UTC timestamp)
    pub iat: u64,
    /// Expiration time (as UTC timestamp)
    pub exp: u64,
}

impl Claims {
    /// Creates claims issued at `issued_at` and valid for `ttl`
    pub fn new(subject_id: String, email: String, issued_at: u64, ttl: Duration) -> Self {
        Self {
            sub: subject_id,
            email,
            iat: issued_at,
            exp: issued_at.saturating_add(ttl.as_secs()),
        }
    }

    /// Check if the claims are expired at `now`
    pub fn is_expired_at(&self, now: u64) -> bool {
        now >= self.exp
    }
}

/// Signs and verifies HS256 bearer tokens with a server-held secret
pub struct TokenManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenManager")
            .field("keys", &"[REDACTED]")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl TokenManager {
    /// Creates a new token manager with a secret and token lifetime
    pub fn new(secret: &str, ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against an explicit clock in `verify_at`
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }

    /// Claims for a subject issued at `issued_at` with this manager's lifetime
    pub fn claims_for(&self, subject_id: &str, email: &str, issued_at: u64) -> Claims {
        Claims::new(subject_id.to_string(), email.to_string(), issued_at, self.ttl)
    }

    /// Signs the given claims
    pub fn sign(&self, claims: &Claims) -> Result<String, String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| format!("Failed to generate token: {}", e))
    }

    /// Verifies signature and expiry against the current time
    pub fn verify(&self, token: &str) -> Result<Claims, VerifyError> {
        self.verify_at(token, unix_now())
    }

    /// Verifies signature, then checks `now < exp`
    pub fn verify_at(&self, token: &str, now: u64) -> Result<Claims, VerifyError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    VerifyError::BadSignature
                }
                ErrorKind::ExpiredSignature => VerifyError::Expired,
                _ => VerifyError::Malformed(e.to_string()),
            }
        })?;

        if data.claims.is_expired_at(now) {
            return Err(VerifyError::Expired);
        }

        Ok(data.claims)
    }
}

/// Extracts bearer token from an Authorization header value
///
/// The scheme name is matched case-insensitively.
pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    let (scheme, token) = auth_header.trim_start().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
