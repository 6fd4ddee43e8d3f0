pub mod bearer;
pub mod claims;
pub mod error;
pub mod factory;
pub mod jwks;
pub mod permissions;
pub mod verifier;

use axum::http::HeaderValue;

pub use claims::DecodedClaims;
pub use error::{AuthError, AuthResult};
pub use factory::build_authorizer;
pub use verifier::TokenVerifier;

use jwks::JwksCache;

/// Bearer pipeline: header -> token -> key set -> verified claims -> permission.
///
/// Holds no per-request state; the only shared piece is the key set, which is
/// loaded once and read-only afterwards.
#[derive(Debug)]
pub struct Authorizer {
    verifier: TokenVerifier,
    jwks: JwksCache,
}

impl Authorizer {
    pub fn new(verifier: TokenVerifier, jwks: JwksCache) -> Self {
        Self { verifier, jwks }
    }

    pub async fn authorize(
        &self,
        header: Option<&HeaderValue>,
        required: &str,
    ) -> AuthResult<DecodedClaims> {
        let token = bearer::extract_token(header)?;
        let keys = self.jwks.key_set().await?;
        let claims = self.verifier.verify(token, keys)?;
        permissions::check_permission(&claims, required)?;
        Ok(claims)
    }
}
