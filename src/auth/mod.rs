use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config;

pub mod password;

/// Signed token payload: the subject's id and email plus issue/expiry stamps.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub id: String,
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(id: String, email: String) -> Self {
        let now = Utc::now();
        let expiry_hours = config::config().security.jwt_expiry_hours;
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            id,
            email,
            exp,
            iat: now.timestamp(),
        }
    }
}

/// The authenticated subject, scoped to one request.
#[derive(Clone, Debug)]
pub struct Identity {
    pub subject_id: String,
    pub email: String,
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Self {
            subject_id: claims.id,
            email: claims.email,
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("authorization header is missing or not a bearer token")]
    Malformed,
    #[error("token signature or signing algorithm is invalid")]
    InvalidSignature,
    #[error("token payload is not a valid claim set")]
    Invalid,
    #[error("token has expired")]
    Expired,
    #[error("token generation failed: {0}")]
    Generation(String),
}

/// Issue a signed bearer token for the given subject.
pub fn issue_token(subject_id: &str, email: &str) -> Result<String, AuthError> {
    let secret = &config::config().security.token_key;
    let claims = Claims::new(subject_id.to_string(), email.to_string());

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    let header = Header::default();

    encode(&header, &claims, &encoding_key).map_err(|e| AuthError::Generation(e.to_string()))
}

/// Verify a raw token string and extract the identity it carries.
pub fn verify_token(token: &str) -> Result<Identity, AuthError> {
    let secret = &config::config().security.token_key;

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    // Default validation pins HS256 and requires a live exp claim
    let validation = Validation::default();

    let token_data =
        decode::<Claims>(token, &decoding_key, &validation).map_err(|e| match e.kind() {
            ErrorKind::InvalidSignature
            | ErrorKind::InvalidAlgorithm
            | ErrorKind::InvalidAlgorithmName => AuthError::InvalidSignature,
            ErrorKind::ExpiredSignature => AuthError::Expired,
            _ => AuthError::Invalid,
        })?;

    Ok(Identity::from(token_data.claims))
}

/// Verify the value of an `Authorization` header.
///
/// Fails with [`AuthError::Malformed`] when the header is absent or does not
/// use the `Bearer ` scheme; otherwise delegates to [`verify_token`].
pub fn verify_bearer(header: Option<&str>) -> Result<Identity, AuthError> {
    let header = header.ok_or(AuthError::Malformed)?;
    let token = header.strip_prefix("Bearer ").ok_or(AuthError::Malformed)?;

    if token.trim().is_empty() {
        return Err(AuthError::Malformed);
    }

    verify_token(token.trim())
}
