//! Session token issuance and verification.
//!
//! Tokens are HMAC-signed JWTs carrying the subject (user id as a string)
//! and an expiry timestamp. Verification is stateless.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AuthConfig;

/// Algorithm used for newly issued tokens.
pub const SIGNING_ALGORITHM: Algorithm = Algorithm::HS256;

/// Token errors. Every variant is terminal for the request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// No signing secret is configured.
    #[error("signing secret is not configured")]
    MissingSecret,

    /// The signing primitive failed.
    #[error("failed to sign token: {0}")]
    Signing(String),

    /// The header declares an algorithm outside the HMAC family.
    #[error("unexpected signing algorithm: {0}")]
    AlgorithmMismatch(String),

    /// The signature does not match the secret.
    #[error("invalid token signature")]
    InvalidSignature,

    /// The token is past its expiry.
    #[error("token has expired")]
    Expired,

    /// The token cannot be decoded.
    #[error("malformed token: {0}")]
    Malformed(String),
}

/// Token claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id, stringified).
    pub sub: String,
    /// Issued-at timestamp (Unix seconds). Optional on the wire.
    #[serde(default)]
    pub iat: i64,
    /// Expiration timestamp (Unix seconds).
    pub exp: i64,
}

impl Claims {
    /// Subject parsed as a user id.
    pub fn subject_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

#[derive(Deserialize)]
struct RawHeader {
    alg: String,
}

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

fn hmac_algorithm(name: &str) -> Option<Algorithm> {
    match name {
        "HS256" => Some(Algorithm::HS256),
        "HS384" => Some(Algorithm::HS384),
        "HS512" => Some(Algorithm::HS512),
        _ => None,
    }
}

/// Issue a token for `subject_id` valid for `ttl_secs` seconds.
pub fn issue_token(secret: &[u8], subject_id: i64, ttl_secs: u64) -> Result<String, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let iat = now();
    let ttl = i64::try_from(ttl_secs).unwrap_or(i64::MAX);
    let claims = Claims {
        sub: subject_id.to_string(),
        iat,
        exp: iat.saturating_add(ttl),
    };

    encode(
        &Header::new(SIGNING_ALGORITHM),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| TokenError::Signing(e.to_string()))
}

/// Verify a token and return its claims.
///
/// Checks run in a fixed order: structure, algorithm family, signature,
/// claim shape, expiry. A token is expired once `now >= exp`.
pub fn verify_token(token: &str, secret: &[u8]) -> Result<Claims, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let mut segments = token.split('.');
    let (Some(header), Some(_), Some(_), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(TokenError::Malformed("expected three segments".to_string()));
    };

    let header_bytes = URL_SAFE_NO_PAD
        .decode(header)
        .map_err(|e| TokenError::Malformed(format!("header encoding: {e}")))?;
    let raw: RawHeader = serde_json::from_slice(&header_bytes)
        .map_err(|e| TokenError::Malformed(format!("header: {e}")))?;

    let algorithm =
        hmac_algorithm(&raw.alg).ok_or_else(|| TokenError::AlgorithmMismatch(raw.alg.clone()))?;

    let mut validation = Validation::new(algorithm);
    // Expiry is checked below without leeway.
    validation.validate_exp = false;
    validation.leeway = 0;
    validation.required_spec_claims.insert("sub".to_string());

    let data = decode::<Claims>(token, &DecodingKey::from_secret(secret), &validation).map_err(
        |e| match e.kind() {
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            ErrorKind::InvalidAlgorithm => TokenError::AlgorithmMismatch(raw.alg.clone()),
            _ => TokenError::Malformed(e.to_string()),
        },
    )?;

    if now() >= data.claims.exp {
        return Err(TokenError::Expired);
    }

    Ok(data.claims)
}

/// Token service bound to the process-wide secret and lifetime.
#[derive(Clone)]
pub struct TokenService {
    secret: Vec<u8>,
    ttl_secs: u64,
}

impl TokenService {
    /// Create a token service.
    pub fn new(secret: impl Into<Vec<u8>>, ttl_secs: u64) -> Self {
        Self {
            secret: secret.into(),
            ttl_secs,
        }
    }

    /// Create a token service from the authentication configuration.
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.jwt_secret.as_bytes(), config.jwt_expiration_secs)
    }

    /// Whether a signing secret is configured.
    pub fn is_configured(&self) -> bool {
        !self.secret.is_empty()
    }

    /// Issue a token for a user id.
    pub fn issue(&self, subject_id: i64) -> Result<String, TokenError> {
        issue_token(&self.secret, subject_id, self.ttl_secs)
    }

    /// Verify a token.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        verify_token(token, &self.secret)
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("secret", &"<redacted>")
            .field("ttl_secs", &self.ttl_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SECRET: &[u8] = b"test-secret";

    fn b64(value: &serde_json::Value) -> String {
        URL_SAFE_NO_PAD.encode(serde_json::to_vec(value).unwrap())
    }

    fn sign_with(alg: Algorithm, claims: &serde_json::Value, secret: &[u8]) -> String {
        encode(&Header::new(alg), claims, &EncodingKey::from_secret(secret)).unwrap()
    }

    #[test]
    fn test_issue_and_verify() {
        let token = issue_token(SECRET, 42, 3600).unwrap();
        let claims = verify_token(&token, SECRET).unwrap();

        assert_eq!(claims.sub, "42");
        assert_eq!(claims.subject_id(), Some(42));
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_token_has_three_segments_and_hs256_header() {
        let token = issue_token(SECRET, 1, 60).unwrap();
        let parts: Vec<&str> = token.split('.').collect();
        assert_eq!(parts.len(), 3);

        let header: serde_json::Value =
            serde_json::from_slice(&URL_SAFE_NO_PAD.decode(parts[0]).unwrap()).unwrap();
        assert_eq!(header["alg"], "HS256");
    }

    #[test]
    fn test_zero_ttl_is_expired() {
        let token = issue_token(SECRET, 7, 0).unwrap();
        assert_eq!(verify_token(&token, SECRET), Err(TokenError::Expired));
    }

    #[test]
    fn test_past_expiry_is_expired() {
        let past = now() - 10;
        let token = sign_with(
            Algorithm::HS256,
            &json!({"sub": "1", "iat": past - 60, "exp": past}),
            SECRET,
        );
        assert_eq!(verify_token(&token, SECRET), Err(TokenError::Expired));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = issue_token(SECRET, 1, 3600).unwrap();
        assert_eq!(
            verify_token(&token, b"other-secret"),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let token = issue_token(SECRET, 1, 3600).unwrap();
        let parts: Vec<&str> = token.split('.').collect();
        let forged_payload = b64(&json!({"sub": "2", "iat": now(), "exp": now() + 3600}));
        let forged = format!("{}.{}.{}", parts[0], forged_payload, parts[2]);

        assert_eq!(
            verify_token(&forged, SECRET),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_other_hmac_variants_accepted() {
        let exp = now() + 3600;
        for alg in [Algorithm::HS384, Algorithm::HS512] {
            let token = sign_with(alg, &json!({"sub": "5", "iat": now(), "exp": exp}), SECRET);
            let claims = verify_token(&token, SECRET).unwrap();
            assert_eq!(claims.sub, "5");
        }
    }

    #[test]
    fn test_none_algorithm_rejected() {
        let header = b64(&json!({"alg": "none", "typ": "JWT"}));
        let payload = b64(&json!({"sub": "1", "iat": now(), "exp": now() + 3600}));
        let token = format!("{header}.{payload}.");

        assert_eq!(
            verify_token(&token, SECRET),
            Err(TokenError::AlgorithmMismatch("none".to_string()))
        );
    }

    #[test]
    fn test_asymmetric_algorithm_rejected_before_signature() {
        // Signature is a valid HS256 MAC; only the declared algorithm differs.
        let valid = issue_token(SECRET, 1, 3600).unwrap();
        let parts: Vec<&str> = valid.split('.').collect();
        let header = b64(&json!({"alg": "RS256", "typ": "JWT"}));
        let token = format!("{header}.{}.{}", parts[1], parts[2]);

        assert_eq!(
            verify_token(&token, SECRET),
            Err(TokenError::AlgorithmMismatch("RS256".to_string()))
        );
    }

    #[test]
    fn test_malformed_tokens() {
        for token in ["", "abc", "a.b", "a.b.c.d", "!!!.payload.sig"] {
            assert!(
                matches!(verify_token(token, SECRET), Err(TokenError::Malformed(_))),
                "token {token:?} should be malformed"
            );
        }
    }

    #[test]
    fn test_issued_at_is_optional() {
        let exp = now() + 3600;
        let token = sign_with(Algorithm::HS256, &json!({"sub": "8", "exp": exp}), SECRET);

        let claims = verify_token(&token, SECRET).unwrap();
        assert_eq!(claims.subject_id(), Some(8));
        assert_eq!(claims.exp, exp);
        assert_eq!(claims.iat, 0);
    }

    #[test]
    fn test_missing_expiry_is_malformed() {
        let token = sign_with(Algorithm::HS256, &json!({"sub": "8", "iat": now()}), SECRET);
        assert!(matches!(
            verify_token(&token, SECRET),
            Err(TokenError::Malformed(_))
        ));
    }

    #[test]
    fn test_missing_subject_is_malformed() {
        let token = sign_with(
            Algorithm::HS256,
            &json!({"iat": now(), "exp": now() + 3600}),
            SECRET,
        );
        assert!(matches!(
            verify_token(&token, SECRET),
            Err(TokenError::Malformed(_))
        ));
    }

    #[test]
    fn test_non_numeric_subject_decodes_without_id() {
        let token = sign_with(
            Algorithm::HS256,
            &json!({"sub": "alice", "iat": now(), "exp": now() + 3600}),
            SECRET,
        );
        let claims = verify_token(&token, SECRET).unwrap();
        assert_eq!(claims.subject_id(), None);
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert_eq!(issue_token(b"", 1, 60), Err(TokenError::MissingSecret));
        let token = issue_token(SECRET, 1, 60).unwrap();
        assert_eq!(verify_token(&token, b""), Err(TokenError::MissingSecret));
    }

    #[test]
    fn test_token_service_round_trip() {
        let service = TokenService::new("service-secret", 600);
        assert!(service.is_configured());

        let token = service.issue(9).unwrap();
        let claims = service.verify(&token).unwrap();
        assert_eq!(claims.subject_id(), Some(9));
        assert_eq!(claims.exp - claims.iat, 600);
    }

    #[test]
    fn test_token_service_from_config() {
        let mut config = AuthConfig::default();
        config.jwt_secret = "configured".to_string();

        let service = TokenService::from_config(&config);

        let token = service.issue(3).unwrap();
        let claims = verify_token(&token, b"configured").unwrap();
        assert_eq!(claims.exp - claims.iat, 86400);
    }

    #[test]
    fn test_token_service_debug_redacts_secret() {
        let service = TokenService::new("do-not-print", 60);
        assert!(!format!("{service:?}").contains("do-not-print"));
    }
}
