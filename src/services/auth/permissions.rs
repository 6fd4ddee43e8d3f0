/*
 * Responsibility
 * - Permission strings granted to the casting roles (`verb:resource`)
 * - Set-membership check against verified claims
 */
use super::claims::DecodedClaims;
use super::error::{AuthError, AuthResult};

pub const GET_MOVIES: &str = "get:movies";
pub const POST_MOVIES: &str = "post:movies";
pub const PATCH_MOVIES: &str = "patch:movies";
pub const DELETE_MOVIES: &str = "delete:movies";

pub const GET_ACTORS: &str = "get:actors";
pub const POST_ACTORS: &str = "post:actors";
pub const PATCH_ACTORS: &str = "patch:actors";
pub const DELETE_ACTORS: &str = "delete:actors";

/// Permission strings are opaque; no parsing of verb/resource happens here.
pub fn check_permission(claims: &DecodedClaims, required: &str) -> AuthResult<()> {
    let granted = claims
        .permissions
        .as_ref()
        .ok_or(AuthError::MissingPermissionsClaim)?;

    if granted.iter().any(|permission| permission == required) {
        Ok(())
    } else {
        Err(AuthError::PermissionDenied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::claims::Audience;
    use serde_json::Map;

    fn claims(permissions: Option<&[&str]>) -> DecodedClaims {
        DecodedClaims {
            iss: "https://casting.example.com/".into(),
            aud: Audience::Single("casting".into()),
            exp: 0,
            sub: None,
            permissions: permissions.map(|p| p.iter().map(|s| s.to_string()).collect()),
            extra: Map::new(),
        }
    }

    #[test]
    fn granted_permission_passes() {
        let claims = claims(Some(&[GET_MOVIES, GET_ACTORS]));
        assert_eq!(check_permission(&claims, GET_ACTORS), Ok(()));
    }

    #[test]
    fn missing_permission_is_forbidden() {
        let err = check_permission(&claims(Some(&[])), POST_MOVIES).expect_err("forbidden");
        assert_eq!(err, AuthError::PermissionDenied);
        assert_eq!(err.status(), axum::http::StatusCode::FORBIDDEN);
        assert_eq!(err.code(), "unauthorized");
    }

    #[test]
    fn absent_claim_is_a_bad_request() {
        let err = check_permission(&claims(None), GET_MOVIES).expect_err("missing claim");
        assert_eq!(err, AuthError::MissingPermissionsClaim);
        assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn match_is_exact() {
        let claims = claims(Some(&["get:movies:all", "GET:MOVIES"]));
        assert_eq!(
            check_permission(&claims, GET_MOVIES),
            Err(AuthError::PermissionDenied)
        );
    }
}
