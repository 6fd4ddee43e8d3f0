use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::services::auth::{AuthError, DecodedClaims};

/// Handler-side access to the claims of the verified token.
/// The permission middleware must have run; without it the request is treated
/// as carrying no credentials (401).
pub struct Claims(pub DecodedClaims);

impl<S> FromRequestParts<S> for Claims
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<DecodedClaims>()
            .cloned()
            .map(Claims)
            .ok_or(AppError::Auth(AuthError::MissingHeader))
    }
}
