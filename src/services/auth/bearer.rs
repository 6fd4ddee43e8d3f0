/*
 * Responsibility
 * - Authorization header -> raw bearer token
 * - Only the header shape is checked here; the token itself is opaque
 */
use axum::http::HeaderValue;

use super::error::{AuthError, AuthResult};

const SCHEME: &str = "Bearer";

pub fn extract_token(header: Option<&HeaderValue>) -> AuthResult<&str> {
    let raw = header
        .ok_or(AuthError::MissingHeader)?
        .to_str()
        .map_err(|_| AuthError::MalformedHeader("Authorization header must be valid ASCII."))?;

    let parts: Vec<&str> = raw.split_whitespace().collect();

    // scheme is compared case-sensitively
    if parts.first() != Some(&SCHEME) {
        return Err(AuthError::MalformedHeader(
            "Authorization header must start with \"Bearer\".",
        ));
    }

    match parts.as_slice() {
        [_, token] => Ok(*token),
        [_] => Err(AuthError::MalformedHeader("Token not found.")),
        _ => Err(AuthError::MalformedHeader(
            "Authorization header must be bearer token.",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(value: &'static str) -> AuthResult<String> {
        let header = HeaderValue::from_static(value);
        extract_token(Some(&header)).map(str::to_owned)
    }

    #[test]
    fn accepts_bearer_token() {
        assert_eq!(extract("Bearer abc.def.ghi").as_deref(), Ok("abc.def.ghi"));
    }

    #[test]
    fn missing_header_is_reported_as_such() {
        let err = extract_token(None).expect_err("should reject");
        assert_eq!(err, AuthError::MissingHeader);
        assert_eq!(err.code(), "authorization_header_missing");
    }

    #[test]
    fn scheme_is_case_sensitive() {
        let err = extract("bearer abc").expect_err("should reject lowercase scheme");
        assert_eq!(err.code(), "invalid_header");
        assert_eq!(err.status(), axum::http::StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn rejects_other_schemes() {
        let err = extract("Basic dXNlcjpwYXNz").expect_err("should reject");
        assert!(matches!(err, AuthError::MalformedHeader(_)));
    }

    #[test]
    fn rejects_missing_token_part() {
        let err = extract("Bearer").expect_err("should reject");
        assert_eq!(err, AuthError::MalformedHeader("Token not found."));
    }

    #[test]
    fn rejects_extra_parts() {
        let err = extract("Bearer abc def").expect_err("should reject");
        assert_eq!(
            err,
            AuthError::MalformedHeader("Authorization header must be bearer token.")
        );
    }

    #[test]
    fn rejects_empty_header() {
        let err = extract("").expect_err("should reject");
        assert_eq!(err.code(), "invalid_header");
    }
}
