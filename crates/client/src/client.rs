use std::sync::Arc;
use std::time::Duration;

use common::types::CompanyDto;
use configs::ClientConfig;
use tracing::{info, instrument};

use crate::backend::{CompanyBackend, HttpCompanyBackend};
use crate::cache::CompanyCache;
use crate::error::ClientError;

/// Read-through client over a [`CompanyBackend`].
///
/// Backend failures leave the cache untouched and are returned unchanged.
/// Any successful write evicts the cached list; update and delete also evict
/// the cached entry for that id. A read that overlaps a write does not
/// repopulate the cache with its result.
pub struct CompanyClient<B: CompanyBackend + ?Sized> {
    backend: Arc<B>,
    cache: CompanyCache,
}

impl CompanyClient<HttpCompanyBackend> {
    pub fn from_config(cfg: &ClientConfig) -> Self {
        let cache = CompanyCache::with_capacity(Duration::from_secs(cfg.cache_ttl_secs), cfg.cache_max_entries);
        Self::new(Arc::new(HttpCompanyBackend::new(cfg.base_url.clone())), cache)
    }
}

impl<B: CompanyBackend + ?Sized> CompanyClient<B> {
    pub fn new(backend: Arc<B>, cache: CompanyCache) -> Self {
        Self { backend, cache }
    }

    pub fn cache(&self) -> &CompanyCache {
        &self.cache
    }

    /// All companies, served from cache while fresh.
    pub async fn list(&self) -> Result<Vec<CompanyDto>, ClientError> {
        if let Some(cached) = self.cache.get_list().await {
            return Ok(cached);
        }
        let seen = self.cache.generation();
        let companies = self.backend.list().await?;
        self.cache.put_list(seen, &companies).await;
        Ok(companies)
    }

    /// One company, served from cache while fresh. Absent results are not cached.
    pub async fn get(&self, id: i32) -> Result<Option<CompanyDto>, ClientError> {
        if let Some(cached) = self.cache.get_one(id).await {
            return Ok(Some(cached));
        }
        let seen = self.cache.generation();
        let found = self.backend.get(id).await?;
        if let Some(company) = &found {
            self.cache.put_one(seen, id, company).await;
        }
        Ok(found)
    }

    pub async fn get_by_isin(&self, isin: &str) -> Result<Option<CompanyDto>, ClientError> {
        self.backend.get_by_isin(isin).await
    }

    #[instrument(skip(self, company), fields(isin = %company.isin))]
    pub async fn create(&self, company: &CompanyDto) -> Result<CompanyDto, ClientError> {
        let created = self.backend.create(company).await?;
        self.cache.invalidate_list().await;
        info!(id = ?created.id, "company created; list cache evicted");
        Ok(created)
    }

    #[instrument(skip(self, company))]
    pub async fn update(&self, id: i32, company: &CompanyDto) -> Result<(), ClientError> {
        self.backend.update(id, company).await?;
        self.evict(id).await;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ClientError> {
        self.backend.delete(id).await?;
        self.evict(id).await;
        Ok(())
    }

    async fn evict(&self, id: i32) {
        self.cache.invalidate_list().await;
        self.cache.invalidate_one(id).await;
        info!(id, "list and entity cache evicted");
    }
}
