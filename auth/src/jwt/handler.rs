use chrono::Duration;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Serialize;

use super::claims::Claims;
use super::claims::Role;
use super::errors::JwtError;

/// JWT token handler for issuing and verifying access tokens.
///
/// Signs with HS256 (HMAC with SHA-256). Verification only accepts HS256
/// headers, so a token re-labelled with another algorithm is rejected before
/// its signature is looked at.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Load it from configuration at startup, never from request input
    pub fn new(secret: &[u8]) -> Self {
        let algorithm = Algorithm::HS256;

        let mut validation = Validation::new(algorithm);
        validation.leeway = 0;
        validation.validate_exp = true;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Issue a signed token for a user.
    ///
    /// # Arguments
    /// * `user_id` - Identity stored in the `sub` claim
    /// * `role` - Role tag
    /// * `ttl` - Lifetime; `exp = now + ttl`
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed or `ttl` overflows the clock
    pub fn issue(
        &self,
        user_id: impl ToString,
        role: Role,
        ttl: Duration,
    ) -> Result<String, JwtError> {
        self.encode(&Claims::new(user_id, role, ttl)?)
    }

    /// Encode claims into a signed token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let header = Header::new(Algorithm::HS256);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify a token and return its claims.
    ///
    /// The signature is checked before the claims are deserialized; the
    /// expiration is checked afterwards with no leeway.
    ///
    /// # Errors
    /// * `InvalidSignature` - Signature does not match header and payload
    /// * `InvalidAlgorithm` - Header names an algorithm other than HS256
    /// * `TokenExpired` - Current time is past `exp`
    /// * `Malformed` - Token framing, encoding or claims are invalid
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                    JwtError::InvalidAlgorithm
                }
                _ => JwtError::Malformed(e.to_string()),
            })
    }
}
