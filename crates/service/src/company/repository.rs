use async_trait::async_trait;

use super::domain::{Company, CompanyDraft};
use crate::errors::ServiceError;

/// Persistence contract for companies.
///
/// Lookups return `Ok(None)` for a missing key. Implementations must enforce
/// ISIN uniqueness themselves and report a collision as
/// [`ServiceError::DuplicateKey`]; the service-level check is not race-safe.
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    async fn get_by_id(&self, id: i32) -> Result<Option<Company>, ServiceError>;
    async fn get_by_isin(&self, isin: &str) -> Result<Option<Company>, ServiceError>;
    async fn get_all(&self) -> Result<Vec<Company>, ServiceError>;
    /// Insert and return the stored row with its assigned id. `draft.id` is ignored.
    async fn add(&self, draft: &CompanyDraft) -> Result<Company, ServiceError>;
    async fn update(&self, company: &Company) -> Result<(), ServiceError>;
    async fn delete(&self, company: &Company) -> Result<(), ServiceError>;
}
