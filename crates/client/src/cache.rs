//! TTL cache for company reads.
//!
//! One entry under [`COLLECTION_KEY`] holds the last list result; one entry per
//! company under `companies_{id}` holds the last single read. Every entry
//! expires at insertion time + TTL and is never served afterwards.
//!
//! Fills carry the [`CompanyCache::generation`] observed before the backend
//! read. Every invalidation bumps the generation, so a read that started before
//! a write can never store its older result after the write's eviction.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use common::types::CompanyDto;
use moka::future::Cache;
use tracing::debug;

use crate::metrics::{CACHE_HITS_TOTAL, CACHE_INVALIDATIONS_TOTAL, CACHE_MISSES_TOTAL};

pub const COLLECTION_KEY: &str = "companies";
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);
const DEFAULT_MAX_ENTRIES: u64 = 1024;

pub fn entity_key(id: i32) -> String {
    format!("{COLLECTION_KEY}_{id}")
}

#[derive(Debug, Clone)]
enum Cached {
    List(Arc<Vec<CompanyDto>>),
    One(Arc<CompanyDto>),
}

#[derive(Clone)]
pub struct CompanyCache {
    store: Cache<String, Cached>,
    ttl: Duration,
    generation: Arc<AtomicU64>,
}

impl CompanyCache {
    pub fn new(ttl: Duration) -> Self {
        Self::with_capacity(ttl, DEFAULT_MAX_ENTRIES)
    }

    pub fn with_capacity(ttl: Duration, max_entries: u64) -> Self {
        let store = Cache::builder().max_capacity(max_entries).time_to_live(ttl).build();
        Self { store, ttl, generation: Arc::new(AtomicU64::new(0)) }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Invalidation counter; read it before fetching what will be passed to a `put_*`.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Insert `value` unless an invalidation happened since `seen`.
    ///
    /// The generation is checked again after the insert; an eviction racing
    /// the insert removes the entry itself.
    async fn fill(&self, seen: u64, key: String, value: Cached) -> bool {
        if self.generation() != seen {
            debug!(%key, "cache fill skipped: invalidated during read");
            return false;
        }
        self.store.insert(key.clone(), value).await;
        if self.generation() != seen {
            self.store.invalidate(&key).await;
            debug!(%key, "cache fill dropped: invalidated during insert");
            return false;
        }
        true
    }

    fn bump(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub async fn get_list(&self) -> Option<Vec<CompanyDto>> {
        match self.store.get(COLLECTION_KEY).await {
            Some(Cached::List(list)) => {
                CACHE_HITS_TOTAL.inc();
                debug!(key = COLLECTION_KEY, "cache hit");
                Some(list.as_ref().clone())
            }
            _ => {
                CACHE_MISSES_TOTAL.inc();
                debug!(key = COLLECTION_KEY, "cache miss");
                None
            }
        }
    }

    /// Store a list read that started at generation `seen`. Returns whether it was stored.
    pub async fn put_list(&self, seen: u64, companies: &[CompanyDto]) -> bool {
        self.fill(seen, COLLECTION_KEY.to_string(), Cached::List(Arc::new(companies.to_vec())))
            .await
    }

    pub async fn get_one(&self, id: i32) -> Option<CompanyDto> {
        let key = entity_key(id);
        match self.store.get(&key).await {
            Some(Cached::One(company)) => {
                CACHE_HITS_TOTAL.inc();
                debug!(%key, "cache hit");
                Some(company.as_ref().clone())
            }
            _ => {
                CACHE_MISSES_TOTAL.inc();
                debug!(%key, "cache miss");
                None
            }
        }
    }

    pub async fn put_one(&self, seen: u64, id: i32, company: &CompanyDto) -> bool {
        self.fill(seen, entity_key(id), Cached::One(Arc::new(company.clone()))).await
    }

    // Bump before evicting so a concurrent fill either skips or removes itself.
    pub async fn invalidate_list(&self) {
        self.bump();
        self.store.invalidate(COLLECTION_KEY).await;
        CACHE_INVALIDATIONS_TOTAL.inc();
    }

    pub async fn invalidate_one(&self, id: i32) {
        self.bump();
        self.store.invalidate(&entity_key(id)).await;
        CACHE_INVALIDATIONS_TOTAL.inc();
    }
}

impl Default for CompanyCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apple() -> CompanyDto {
        CompanyDto {
            id: Some(1),
            name: "Apple Inc.".into(),
            exchange: "NASDAQ".into(),
            ticker: "AAPL".into(),
            isin: "US0378331005".into(),
            website: Some("http://www.apple.com".into()),
        }
    }

    #[test]
    fn keys_follow_collection_prefix() {
        assert_eq!(entity_key(42), "companies_42");
    }

    #[tokio::test]
    async fn list_and_entity_entries_are_independent() {
        let cache = CompanyCache::default();
        cache.put_list(cache.generation(), &[apple()]).await;
        assert_eq!(cache.get_list().await, Some(vec![apple()]));
        assert_eq!(cache.get_one(1).await, None);

        cache.put_one(cache.generation(), 1, &apple()).await;
        cache.invalidate_list().await;
        assert_eq!(cache.get_list().await, None);
        assert_eq!(cache.get_one(1).await, Some(apple()));

        cache.invalidate_one(1).await;
        assert_eq!(cache.get_one(1).await, None);
    }

    #[tokio::test]
    async fn fill_from_before_an_invalidation_is_ignored() {
        let cache = CompanyCache::default();
        let seen = cache.generation();
        cache.invalidate_one(1).await;

        assert!(!cache.put_list(seen, &[apple()]).await);
        assert!(!cache.put_one(seen, 1, &apple()).await);
        assert_eq!(cache.get_list().await, None);
        assert_eq!(cache.get_one(1).await, None);

        assert!(cache.put_one(cache.generation(), 1, &apple()).await);
        assert_eq!(cache.get_one(1).await, Some(apple()));
    }

    #[tokio::test]
    async fn entries_expire_after_ttl() {
        let cache = CompanyCache::new(Duration::from_millis(100));
        cache.put_one(cache.generation(), 1, &apple()).await;
        assert!(cache.get_one(1).await.is_some());

        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(cache.get_one(1).await, None);
    }

    #[tokio::test]
    async fn hits_and_misses_are_counted() {
        let cache = CompanyCache::default();
        let hits = CACHE_HITS_TOTAL.get();
        let misses = CACHE_MISSES_TOTAL.get();

        assert!(cache.get_list().await.is_none());
        cache.put_list(cache.generation(), &[apple()]).await;
        assert!(cache.get_list().await.is_some());

        assert!(CACHE_HITS_TOTAL.get() > hits);
        assert!(CACHE_MISSES_TOTAL.get() > misses);
        let text = crate::metrics::encode_metrics().unwrap();
        assert!(text.contains("company_client_cache_hits_total"));
    }
}
