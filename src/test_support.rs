//! Shared fixtures for unit and router tests: one RSA key pair per test
//! binary, RS256 tokens minted against it, and its JWKS document.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, encode};
use rsa::pkcs1::{EncodeRsaPrivateKey, EncodeRsaPublicKey, LineEnding};
use rsa::rand_core::OsRng;
use rsa::traits::PublicKeyParts;
use rsa::RsaPrivateKey;
use serde_json::{Value, json};

use crate::services::auth::{
    Authorizer, TokenVerifier,
    jwks::{JwksCache, JwksFetcher, KeySet},
};

pub const TEST_KID: &str = "test-key";
pub const ISSUER: &str = "https://casting.test.auth0.com/";
pub const AUDIENCE: &str = "casting";

struct KeyMaterial {
    encoding: EncodingKey,
    decoding: DecodingKey,
    modulus: String,
    exponent: String,
}

fn material() -> &'static KeyMaterial {
    static MATERIAL: OnceLock<KeyMaterial> = OnceLock::new();
    MATERIAL.get_or_init(|| {
        let mut rng = OsRng;
        let private_key = RsaPrivateKey::new(&mut rng, 2048).expect("key generation");
        let public_key = private_key.to_public_key();

        let private_pem = private_key
            .to_pkcs1_pem(LineEnding::LF)
            .expect("private pem");
        let public_pem = public_key.to_pkcs1_pem(LineEnding::LF).expect("public pem");

        KeyMaterial {
            encoding: EncodingKey::from_rsa_pem(private_pem.as_bytes()).expect("encoding key"),
            decoding: DecodingKey::from_rsa_pem(public_pem.as_bytes()).expect("decoding key"),
            modulus: URL_SAFE_NO_PAD.encode(public_key.n().to_bytes_be()),
            exponent: URL_SAFE_NO_PAD.encode(public_key.e().to_bytes_be()),
        }
    })
}

pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Knobs for a minted token. Defaults describe a valid token.
pub struct TokenSpec<'a> {
    pub kid: Option<&'a str>,
    pub issuer: &'a str,
    pub audience: &'a str,
    pub expires_in: i64,
    pub permissions: Option<&'a [&'a str]>,
}

impl<'a> TokenSpec<'a> {
    pub fn with_permissions(permissions: &'a [&'a str]) -> Self {
        Self {
            kid: Some(TEST_KID),
            issuer: ISSUER,
            audience: AUDIENCE,
            expires_in: 600,
            permissions: Some(permissions),
        }
    }

    pub fn without_permissions() -> Self {
        Self {
            permissions: None,
            ..Self::with_permissions(&[])
        }
    }
}

pub fn token(spec: TokenSpec<'_>) -> String {
    let issued_at = now();
    let mut claims = json!({
        "iss": spec.issuer,
        "aud": spec.audience,
        "sub": "auth0|casting-test",
        "iat": issued_at,
        "exp": issued_at + spec.expires_in,
    });
    if let Some(permissions) = spec.permissions {
        claims["permissions"] = json!(permissions);
    }

    let mut header = Header::new(Algorithm::RS256);
    header.kid = spec.kid.map(str::to_string);
    encode(&header, &claims, &material().encoding).expect("sign token")
}

pub fn bearer(permissions: &[&str]) -> String {
    format!("Bearer {}", token(TokenSpec::with_permissions(permissions)))
}

pub fn jwks_json() -> Value {
    let material = material();
    json!({
        "keys": [
            {
                "kty": "RSA",
                "use": "sig",
                "alg": "RS256",
                "kid": TEST_KID,
                "n": material.modulus,
                "e": material.exponent
            }
        ]
    })
}

pub fn key_set() -> KeySet {
    KeySet::from_keys([(TEST_KID.to_string(), material().decoding.clone())])
}

/// Authorizer whose key set is already loaded; no network involved.
pub fn authorizer() -> Arc<Authorizer> {
    let verifier =
        TokenVerifier::new(ISSUER, AUDIENCE, &[Algorithm::RS256], 0).expect("verifier");
    let fetcher =
        JwksFetcher::new("http://127.0.0.1:9/jwks", Duration::from_secs(1)).expect("fetcher");
    Arc::new(Authorizer::new(verifier, JwksCache::seeded(fetcher, key_set())))
}
