/*
 * Responsibility
 * - 環境変数の読み込み (.env は dotenvy 経由)
 * - 設定値のバリデーション (不足・不正なら起動失敗)
 * - AUTH0_DOMAIN から issuer と JWKS の URL を導出
 */
use std::net::SocketAddr;
use std::str::FromStr;

use jsonwebtoken::Algorithm;
use thiserror::Error;
use url::Url;

use crate::services::auth::verifier::is_symmetric;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing configuration: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

#[derive(Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,

    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    pub auth_issuer: String,
    pub jwks_url: Url,
    pub api_audience: String,
    pub algorithms: Vec<Algorithm>,
    pub access_token_leeway_seconds: u64,
    pub jwks_timeout_seconds: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8080);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let app_env = AppEnv::from_env();

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let domain =
            std::env::var("AUTH0_DOMAIN").map_err(|_| ConfigError::Missing("AUTH0_DOMAIN"))?;
        let issuer = issuer_url(&domain)?;

        let jwks_url = match std::env::var("JWKS_URL") {
            Ok(raw) => Url::parse(raw.trim()).map_err(|_| ConfigError::Invalid("JWKS_URL"))?,
            Err(_) => jwks_url_for(&issuer)?,
        };

        let api_audience =
            std::env::var("API_AUDIENCE").map_err(|_| ConfigError::Missing("API_AUDIENCE"))?;
        if api_audience.trim().is_empty() {
            return Err(ConfigError::Invalid("API_AUDIENCE"));
        }

        let algorithms = match std::env::var("ALGORITHMS") {
            Ok(raw) => parse_algorithms(&raw)?,
            Err(_) => vec![Algorithm::RS256],
        };

        let access_token_leeway_seconds = std::env::var("ACCESS_TOKEN_LEEWAY_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0);

        let jwks_timeout_seconds = std::env::var("JWKS_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(5);

        Ok(Self {
            addr,
            database_url,
            app_env,
            cors_allowed_origins,
            auth_issuer: issuer.to_string(),
            jwks_url,
            api_audience,
            algorithms,
            access_token_leeway_seconds,
            jwks_timeout_seconds,
        })
    }
}

/// `casting.eu.auth0.com` -> `https://casting.eu.auth0.com/`.
/// A value that already carries a scheme is used as-is (plus trailing slash).
fn issuer_url(domain: &str) -> Result<Url, ConfigError> {
    let domain = domain.trim().trim_end_matches('/');
    if domain.is_empty() {
        return Err(ConfigError::Invalid("AUTH0_DOMAIN"));
    }

    let raw = if domain.contains("://") {
        format!("{domain}/")
    } else {
        format!("https://{domain}/")
    };
    Url::parse(&raw).map_err(|_| ConfigError::Invalid("AUTH0_DOMAIN"))
}

fn jwks_url_for(issuer: &Url) -> Result<Url, ConfigError> {
    issuer
        .join(".well-known/jwks.json")
        .map_err(|_| ConfigError::Invalid("AUTH0_DOMAIN"))
}

/// Accepts `["RS256", "ES256"]` (JSON) or `RS256,ES256`.
/// Shared-secret algorithms are refused: keys come from a public key set.
pub fn parse_algorithms(raw: &str) -> Result<Vec<Algorithm>, ConfigError> {
    let names: Vec<String> = match serde_json::from_str::<Vec<String>>(raw) {
        Ok(list) => list,
        Err(_) => raw
            .split(',')
            .map(|s| s.trim().trim_matches('"').to_string())
            .filter(|s| !s.is_empty())
            .collect(),
    };

    if names.is_empty() {
        return Err(ConfigError::Invalid("ALGORITHMS"));
    }

    names
        .iter()
        .map(|name| {
            let alg = Algorithm::from_str(name).map_err(|_| ConfigError::Invalid("ALGORITHMS"))?;
            if is_symmetric(alg) {
                return Err(ConfigError::Invalid("ALGORITHMS"));
            }
            Ok(alg)
        })
        .collect()
}
