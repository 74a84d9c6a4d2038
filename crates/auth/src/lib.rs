//! `trackhub-auth`: bearer-token verification boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage. Tokens are
//! issued by the identity provider; all we do is verify them and turn them
//! into claims.

pub mod claims;
pub mod validator;

pub use claims::{Audience, JwtClaims, TokenValidationError, validate_claims};
pub use validator::{Hs256JwtValidator, JwtValidator};
