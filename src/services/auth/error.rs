//! Authorization failures raised by the bearer pipeline.
//!
//! Every variant knows its HTTP status, a stable machine-readable code and the
//! description sent back to the client. Upstream detail (why the key set could
//! not be fetched) is kept for logs only.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::error::ErrorResponse;

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Authorization header is expected.")]
    MissingHeader,

    #[error("{0}")]
    MalformedHeader(&'static str),

    #[error("Authorization malformed.")]
    MalformedToken,

    #[error("Unable to find the appropriate key.")]
    KeyNotFound,

    #[error("Token expired.")]
    TokenExpired,

    #[error("Incorrect claims. Please, check the audience and issuer.")]
    InvalidClaims,

    #[error("Unable to parse authentication token.")]
    InvalidToken,

    #[error("Permissions not included in JWT.")]
    MissingPermissionsClaim,

    #[error("Permission not found.")]
    PermissionDenied,

    #[error("Unable to fetch signing keys.")]
    UpstreamKeySetUnavailable(String),
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::MissingHeader
            | AuthError::MalformedHeader(_)
            | AuthError::MalformedToken
            | AuthError::TokenExpired
            | AuthError::InvalidClaims => StatusCode::UNAUTHORIZED,
            AuthError::KeyNotFound | AuthError::InvalidToken | AuthError::MissingPermissionsClaim => {
                StatusCode::BAD_REQUEST
            }
            AuthError::PermissionDenied => StatusCode::FORBIDDEN,
            AuthError::UpstreamKeySetUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingHeader => "authorization_header_missing",
            AuthError::MalformedHeader(_)
            | AuthError::MalformedToken
            | AuthError::KeyNotFound
            | AuthError::InvalidToken => "invalid_header",
            AuthError::TokenExpired => "token_expired",
            AuthError::InvalidClaims | AuthError::MissingPermissionsClaim => "invalid_claims",
            AuthError::PermissionDenied => "unauthorized",
            AuthError::UpstreamKeySetUnavailable(_) => "jwks_unavailable",
        }
    }

    /// Client-facing description. Never includes upstream detail.
    pub fn description(&self) -> String {
        self.to_string()
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let AuthError::UpstreamKeySetUnavailable(detail) = &self {
            tracing::error!(%detail, "signing key set unavailable");
        }
        ErrorResponse::new(status, self.code(), self.description()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_the_failure_site() {
        assert_eq!(AuthError::MissingHeader.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::KeyNotFound.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AuthError::PermissionDenied.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            AuthError::MissingPermissionsClaim.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::UpstreamKeySetUnavailable("timeout".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn upstream_detail_stays_out_of_the_description() {
        let err = AuthError::UpstreamKeySetUnavailable("connect refused 10.0.0.1".into());
        assert_eq!(err.description(), "Unable to fetch signing keys.");
        assert!(!err.description().contains("10.0.0.1"));
    }
}
