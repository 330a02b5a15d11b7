//! HS256 verification of provider-issued access tokens

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Token verification errors
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Invalid token: {0}")]
    Invalid(String),

    #[error("Token expired")]
    Expired,

    #[error("Invalid subject claim")]
    InvalidSubject,
}

/// The caller's role, carried in the token by the auth provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Lecturer,
}

/// Claims carried in an access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's uuid at the auth provider
    pub sub: String,
    /// Caller role
    pub role: Role,
    /// Expiry (unix seconds)
    pub exp: i64,
}

impl Claims {
    /// Parse the subject claim as a uuid
    pub fn user_id(&self) -> Result<Uuid, TokenError> {
        self.sub.parse().map_err(|_| TokenError::InvalidSubject)
    }
}

/// Verifies provider-issued HS256 tokens with the shared secret
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    /// Create a verifier from the provider's shared secret
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Verify a bearer token and return its claims
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            })
    }
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier").finish_non_exhaustive()
    }
}
