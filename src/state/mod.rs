use std::sync::Arc;
use std::time::{Duration, Instant};

use moka::future::Cache;
use sea_orm::DatabaseConnection;

use crate::config::{CacheConfig, LimitsConfig};
use crate::models::VariationView;
use crate::verifier::VerifierClient;

#[derive(Clone)]
pub struct AppState {
    pub database: DatabaseConnection,
    pub verifier: VerifierClient,
    pub cache: Arc<ApiCache>,
    pub limits: LimitsConfig,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(
        database: DatabaseConnection,
        verifier: VerifierClient,
        cache: Arc<ApiCache>,
        limits: LimitsConfig,
    ) -> Self {
        assert!(
            cache.variation_capacity >= 1,
            "Variation cache capacity must be configured"
        );
        Self {
            database,
            verifier,
            cache,
            limits,
            start_time: Instant::now(),
        }
    }
}

pub struct ApiCache {
    /// Full variation catalog under a single key; the catalog is immutable
    /// reference data so a short TTL is purely for admin convenience.
    pub variations: Cache<String, Arc<Vec<VariationView>>>,
    pub variation_capacity: u64,
}

impl ApiCache {
    pub fn new(config: &CacheConfig) -> Self {
        assert!(
            config.variations_max_capacity >= 1,
            "Variation cache capacity threshold"
        );

        let variations = Cache::builder()
            .max_capacity(config.variations_max_capacity)
            .time_to_live(Duration::from_secs(config.variations_ttl_seconds))
            .time_to_idle(Duration::from_secs(config.variations_ttl_seconds / 2 + 1))
            .build();

        Self {
            variations,
            variation_capacity: config.variations_max_capacity,
        }
    }
}
