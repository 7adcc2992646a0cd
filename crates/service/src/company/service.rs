use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use super::domain::{Company, CompanyDraft};
use super::repository::CompanyRepository;
use super::validator;
use crate::errors::ServiceError;

/// Application service encapsulating company business rules.
///
/// Every failure is typed; nothing is retried and nothing is cached here.
pub struct CompanyService<R: CompanyRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: CompanyRepository + ?Sized> CompanyService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub async fn get_all(&self) -> Result<Vec<Company>, ServiceError> {
        self.repo.get_all().await
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Company>, ServiceError> { self.repo.get_by_id(id).await }

    pub async fn get_by_isin(&self, isin: &str) -> Result<Option<Company>, ServiceError> { self.repo.get_by_isin(isin).await }

    /// Validate, reject a known ISIN, then persist.
    ///
    /// # Examples
    /// ```
    /// use service::company::{CompanyDraft, CompanyService, repo::memory::InMemoryCompanyRepository};
    /// use std::sync::Arc;
    /// let svc = CompanyService::new(Arc::new(InMemoryCompanyRepository::seeded()));
    /// let draft = CompanyDraft {
    ///     id: None,
    ///     name: "Intel Corporation".into(),
    ///     exchange: "NASDAQ".into(),
    ///     ticker: "INTC".into(),
    ///     isin: "US4581401001".into(),
    ///     website: None,
    /// };
    /// let created = tokio_test::block_on(svc.add(draft)).unwrap();
    /// assert_eq!(created.id, 6);
    /// ```
    #[instrument(skip(self, draft), fields(isin = %draft.isin))]
    pub async fn add(&self, draft: CompanyDraft) -> Result<Company, ServiceError> {
        let violations = validator::validate(&draft);
        if !violations.is_empty() {
            debug!(count = violations.len(), "company_rejected_invalid");
            return Err(ServiceError::Validation(violations));
        }
        if self.repo.get_by_isin(&draft.isin).await?.is_some() {
            warn!("company_rejected_duplicate_isin");
            return Err(ServiceError::DuplicateKey(draft.isin));
        }
        // The repository's unique constraint still decides races between concurrent adds.
        let created = self.repo.add(&draft).await?;
        info!(id = created.id, "company_created");
        Ok(created)
    }

    /// Replace the fields of an existing company.
    ///
    /// Order matters: existence, then identity, then validation, then ISIN ownership.
    /// No write happens unless all of them pass.
    #[instrument(skip(self, draft), fields(isin = %draft.isin))]
    pub async fn update(&self, id: i32, draft: CompanyDraft) -> Result<(), ServiceError> {
        let existing = self
            .repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("company", id))?;

        if let Some(body_id) = draft.id {
            if body_id != existing.id {
                warn!(body_id, "company_rejected_identity_mismatch");
                return Err(ServiceError::IdentityMismatch { path_id: id, body_id });
            }
        }

        let violations = validator::validate(&draft);
        if !violations.is_empty() {
            debug!(count = violations.len(), "company_rejected_invalid");
            return Err(ServiceError::Validation(violations));
        }

        if draft.isin != existing.isin {
            if let Some(owner) = self.repo.get_by_isin(&draft.isin).await? {
                if owner.id != existing.id {
                    warn!(owner_id = owner.id, "company_rejected_duplicate_isin");
                    return Err(ServiceError::DuplicateKey(draft.isin));
                }
            }
        }

        let updated = draft.into_company(existing.id);
        self.repo.update(&updated).await?;
        info!("company_updated");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let existing = self
            .repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("company", id))?;
        self.repo.delete(&existing).await?;
        info!("company_deleted");
        Ok(())
    }
}
