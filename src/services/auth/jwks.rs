//! Trusted signing keys published by the identity provider.
//!
//! The key set is fetched from the provider's JWKS endpoint the first time a
//! request needs it and then kept for the life of the process. Concurrent cold
//! start requests wait on the same fetch. A failed fetch is not cached, so the
//! next request tries again.

use std::{collections::HashMap, time::Duration};

use jsonwebtoken::{
    DecodingKey,
    jwk::{AlgorithmParameters, JwkSet},
};
use reqwest::Client;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use super::error::{AuthError, AuthResult};

/// `kid` -> public verification key. Immutable once built.
#[derive(Clone, Default)]
pub struct KeySet {
    keys: HashMap<String, DecodingKey>,
}

impl KeySet {
    /// Keeps only asymmetric keys that carry a `kid`.
    pub fn from_jwk_set(set: &JwkSet) -> Self {
        let mut keys = HashMap::new();
        for jwk in &set.keys {
            let Some(kid) = jwk.common.key_id.clone() else {
                warn!("skipping JWK without kid");
                continue;
            };
            if matches!(jwk.algorithm, AlgorithmParameters::OctetKey(_)) {
                warn!(kid, "skipping symmetric JWK");
                continue;
            }
            match DecodingKey::from_jwk(jwk) {
                Ok(key) => {
                    keys.insert(kid, key);
                }
                Err(err) => warn!(kid, error = %err, "skipping unusable JWK"),
            }
        }
        Self { keys }
    }

    #[cfg(test)]
    pub fn from_keys<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, DecodingKey)>,
    {
        Self {
            keys: entries.into_iter().collect(),
        }
    }

    pub fn get(&self, kid: &str) -> Option<&DecodingKey> {
        self.keys.get(kid)
    }

    #[cfg(test)]
    pub fn contains(&self, kid: &str) -> bool {
        self.keys.contains_key(kid)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }
}

impl std::fmt::Debug for KeySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Key material is not printed
        let mut kids: Vec<&String> = self.keys.keys().collect();
        kids.sort();
        f.debug_struct("KeySet").field("kids", &kids).finish()
    }
}

#[derive(Clone, Debug)]
pub struct JwksFetcher {
    client: Client,
    url: String,
}

impl JwksFetcher {
    pub fn new(url: impl Into<String>, timeout: Duration) -> AuthResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| AuthError::UpstreamKeySetUnavailable(err.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn fetch(&self) -> AuthResult<KeySet> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|err| AuthError::UpstreamKeySetUnavailable(err.to_string()))?;

        if !response.status().is_success() {
            return Err(AuthError::UpstreamKeySetUnavailable(format!(
                "HTTP {} from {}",
                response.status(),
                self.url
            )));
        }

        let body: JwkSet = response
            .json()
            .await
            .map_err(|err| AuthError::UpstreamKeySetUnavailable(err.to_string()))?;

        Ok(KeySet::from_jwk_set(&body))
    }
}

/// Lazily-initialised, process-scoped key set.
#[derive(Debug)]
pub struct JwksCache {
    fetcher: JwksFetcher,
    keys: OnceCell<KeySet>,
}

impl JwksCache {
    pub fn new(fetcher: JwksFetcher) -> Self {
        Self {
            fetcher,
            keys: OnceCell::new(),
        }
    }

    /// Cache that already holds `keys`; the fetcher is never consulted.
    #[cfg(test)]
    pub fn seeded(fetcher: JwksFetcher, keys: KeySet) -> Self {
        Self {
            fetcher,
            keys: OnceCell::new_with(Some(keys)),
        }
    }

    pub async fn key_set(&self) -> AuthResult<&KeySet> {
        self.keys
            .get_or_try_init(|| async {
                debug!(url = %self.fetcher.url(), "fetching signing key set");
                let keys = self.fetcher.fetch().await?;
                info!(count = keys.len(), "signing key set loaded");
                Ok::<_, AuthError>(keys)
            })
            .await
    }
}
