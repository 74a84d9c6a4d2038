use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, errors::ErrorKind};

use crate::claims::{JwtClaims, TokenValidationError, validate_claims};

/// Verifies a bearer token and yields its claims.
pub trait JwtValidator: Send + Sync {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenValidationError>;
}

/// HS256 shared-secret validator.
///
/// `jsonwebtoken` only checks the signature and that `exp` is present; time
/// checks go through [`validate_claims`] against the caller's clock so tests
/// can pin `now`.
pub struct Hs256JwtValidator {
    key: DecodingKey,
    validation: Validation,
    audience: Option<String>,
}

impl Hs256JwtValidator {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;

        Self {
            key: DecodingKey::from_secret(secret.as_ref()),
            validation,
            audience: None,
        }
    }

    /// Require the `aud` claim to be, or to list, `audience`.
    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }
}

impl JwtValidator for Hs256JwtValidator {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenValidationError> {
        let data = decode::<JwtClaims>(token, &self.key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::InvalidSignature => TokenValidationError::InvalidSignature,
                _ => TokenValidationError::Malformed(e.to_string()),
            }
        })?;
        let claims = data.claims;

        if let Some(expected) = &self.audience {
            if !claims.aud.as_ref().is_some_and(|aud| aud.contains(expected)) {
                tracing::debug!(sub = %claims.sub, "token audience mismatch");
                return Err(TokenValidationError::InvalidAudience);
            }
        }

        validate_claims(&claims, now)?;
        Ok(claims)
    }
}
