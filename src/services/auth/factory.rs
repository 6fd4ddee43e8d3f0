/// Factory: build the `Authorizer` from application `Config`.
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::services::auth::{
    Authorizer, TokenVerifier,
    jwks::{JwksCache, JwksFetcher},
};

pub fn build_authorizer(config: &Config) -> anyhow::Result<Arc<Authorizer>> {
    let verifier = TokenVerifier::new(
        &config.auth_issuer,
        &config.api_audience,
        &config.algorithms,
        config.access_token_leeway_seconds,
    )?;

    let fetcher = JwksFetcher::new(
        config.jwks_url.as_str(),
        Duration::from_secs(config.jwks_timeout_seconds),
    )?;

    tracing::info!(
        issuer = %config.auth_issuer,
        jwks_url = %config.jwks_url,
        algorithms = ?verifier.accepted_algorithms(),
        "authorizer configured"
    );

    Ok(Arc::new(Authorizer::new(verifier, JwksCache::new(fetcher))))
}
