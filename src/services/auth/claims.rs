use serde::Deserialize;
use serde_json::{Map, Value};

/// Claims of a verified access token.
///
/// `permissions` stays optional so that a token without the claim can be told
/// apart from a token with an empty list. Anything else the identity provider
/// puts in the token is kept in `extra`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DecodedClaims {
    pub iss: String,
    pub aud: Audience,
    pub exp: u64,

    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub permissions: Option<Vec<String>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DecodedClaims {
    pub fn subject(&self) -> Option<&str> {
        self.sub.as_deref()
    }
}

/// `aud` may be a single string or a list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    Single(String),
    Many(Vec<String>),
}

impl Audience {
    #[cfg(test)]
    pub fn contains(&self, audience: &str) -> bool {
        match self {
            Audience::Single(value) => value == audience,
            Audience::Many(values) => values.iter().any(|value| value == audience),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keeps_unknown_claims_in_extra() {
        let claims: DecodedClaims = serde_json::from_value(json!({
            "iss": "https://casting.example.com/",
            "aud": ["casting", "https://casting.example.com/userinfo"],
            "exp": 1_900_000_000u64,
            "sub": "auth0|abc",
            "permissions": ["get:movies"],
            "azp": "client-id",
            "scope": "openid"
        }))
        .expect("claims");

        assert!(claims.aud.contains("casting"));
        assert_eq!(claims.subject(), Some("auth0|abc"));
        assert_eq!(claims.permissions.as_deref(), Some(&["get:movies".to_string()][..]));
        assert_eq!(claims.extra.get("azp"), Some(&json!("client-id")));
        assert!(!claims.extra.contains_key("permissions"));
    }

    #[test]
    fn absent_permissions_differs_from_empty() {
        let absent: DecodedClaims = serde_json::from_value(json!({
            "iss": "i", "aud": "a", "exp": 1u64
        }))
        .expect("claims");
        let empty: DecodedClaims = serde_json::from_value(json!({
            "iss": "i", "aud": "a", "exp": 1u64, "permissions": []
        }))
        .expect("claims");

        assert_eq!(absent.permissions, None);
        assert_eq!(empty.permissions, Some(Vec::new()));
    }
}
