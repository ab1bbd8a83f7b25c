use std::sync::Arc;

use crate::{
    db::{Cache, CacheKey},
    error::AppResult,
    models::{CatalogSnapshot, Dish, DrinkSummary, PairingResult},
    services::providers::PairingProvider,
};

/// Read-through Redis cache in front of another pairing provider
///
/// Only successful results are stored. A hit is served only while every drink
/// it names still matches the request's snapshot. When Redis itself is
/// unreachable the inner provider is called directly.
#[derive(Clone)]
pub struct CachedProvider {
    inner: Arc<dyn PairingProvider>,
    cache: Cache,
    ttl: u64,
}

impl CachedProvider {
    pub fn new(inner: Arc<dyn PairingProvider>, cache: Cache, ttl: u64) -> Self {
        Self { inner, cache, ttl }
    }
}

/// True when each cached drink is still in the catalog with the same details
fn matches_snapshot(result: &PairingResult, snapshot: &CatalogSnapshot) -> bool {
    !result.pairings.is_empty()
        && result.pairings.iter().all(|pairing| {
            snapshot
                .get(pairing.drink.id)
                .is_some_and(|drink| DrinkSummary::from(drink) == pairing.drink)
        })
}

#[async_trait::async_trait]
impl PairingProvider for CachedProvider {
    async fn recommend(&self, dish: &Dish, snapshot: &CatalogSnapshot) -> AppResult<PairingResult> {
        let key = CacheKey::Pairing(dish.as_str().to_string());

        match self.cache.get_pairing(&key).await {
            Ok(Some(hit)) if matches_snapshot(&hit, snapshot) => {
                tracing::debug!(key = %key, "Pairing cache hit");
                return Ok(hit);
            }
            Ok(Some(_)) => tracing::info!(key = %key, "Cached pairing no longer matches the catalog"),
            Ok(None) => tracing::debug!(key = %key, "Pairing cache miss"),
            Err(e) => {
                tracing::warn!(error = %e, provider = self.inner.name(), "Pairing cache unavailable, calling provider directly");
                return self.inner.recommend(dish, snapshot).await;
            }
        }

        let fresh = self.inner.recommend(dish, snapshot).await?;
        self.cache.store_pairing(&key, &fresh, self.ttl);
        Ok(fresh)
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}
