use jsonwebtoken::{Algorithm, Validation, decode, decode_header, errors::ErrorKind};

use crate::config::ConfigError;

use super::claims::DecodedClaims;
use super::error::{AuthError, AuthResult};
use super::jwks::KeySet;

/// Algorithms that share a secret between issuer and verifier.
/// These are refused outright: tokens are only ever checked against public keys.
pub fn is_symmetric(alg: Algorithm) -> bool {
    matches!(alg, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)
}

/// Signature + registered-claims verifier for access tokens.
///
/// `jsonwebtoken::Validation` checks:
/// - signature (with the algorithm named in the token header, if accepted)
/// - `exp`
/// - `iss` and `aud` (required, must match)
#[derive(Clone)]
pub struct TokenVerifier {
    accepted: Vec<Algorithm>,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("accepted", &self.accepted)
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    pub fn new(
        issuer: &str,
        audience: &str,
        algorithms: &[Algorithm],
        leeway_seconds: u64,
    ) -> Result<Self, ConfigError> {
        let accepted: Vec<Algorithm> = algorithms
            .iter()
            .copied()
            .filter(|alg| !is_symmetric(*alg))
            .collect();
        let Some(first) = accepted.first().copied() else {
            return Err(ConfigError::Invalid("ALGORITHMS"));
        };

        let mut validation = Validation::new(first);
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud"]);
        validation.leeway = leeway_seconds;

        Ok(Self {
            accepted,
            validation,
        })
    }

    pub fn accepted_algorithms(&self) -> &[Algorithm] {
        &self.accepted
    }

    pub fn verify(&self, token: &str, keys: &KeySet) -> AuthResult<DecodedClaims> {
        if token.split('.').count() != 3 {
            return Err(AuthError::MalformedToken);
        }

        let header = decode_header(token).map_err(|_| AuthError::MalformedToken)?;
        let kid = header.kid.as_deref().ok_or(AuthError::MalformedToken)?;
        let key = keys.get(kid).ok_or(AuthError::KeyNotFound)?;

        if !self.accepted.contains(&header.alg) {
            tracing::debug!(alg = ?header.alg, kid, "token signed with a non-accepted algorithm");
            return Err(AuthError::InvalidToken);
        }

        // Pin verification to the one algorithm the header names.
        let mut validation = self.validation.clone();
        validation.algorithms = vec![header.alg];

        let data = decode::<DecodedClaims>(token, key, &validation).map_err(classify)?;
        tracing::debug!(kid, "verified access token");
        Ok(data.claims)
    }
}

fn classify(err: jsonwebtoken::errors::Error) -> AuthError {
    match err.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        ErrorKind::InvalidAudience | ErrorKind::InvalidIssuer => AuthError::InvalidClaims,
        ErrorKind::MissingRequiredClaim(claim) if claim == "iss" || claim == "aud" => {
            AuthError::InvalidClaims
        }
        _ => {
            tracing::debug!(error = %err, "access token rejected");
            AuthError::InvalidToken
        }
    }
}
