//! In-process repository used by the `memory` storage backend and by tests.
use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::company::domain::{Company, CompanyDraft};
use crate::company::repository::CompanyRepository;
use crate::errors::ServiceError;

/// The five companies every fresh store starts with.
pub fn reference_companies() -> Vec<Company> {
    let row = |id: i32, name: &str, exchange: &str, ticker: &str, isin: &str, website: Option<&str>| Company {
        id,
        name: name.into(),
        exchange: exchange.into(),
        ticker: ticker.into(),
        isin: isin.into(),
        website: website.map(str::to_string),
    };
    vec![
        row(1, "Apple Inc.", "NASDAQ", "AAPL", "US0378331005", Some("http://www.apple.com")),
        row(2, "British Airways Plc", "Pink Sheets", "BAIRY", "US1104193065", None),
        row(3, "Heineken NV", "Euronext Amsterdam", "HEIA", "NL0000009165", None),
        row(4, "Panasonic Corp", "Tokyo Stock Exchange", "6752", "JP3866800000", Some("http://www.panasonic.co.jp")),
        row(5, "Porsche Automobil", "Deutsche Börse", "PAH3", "DE000PAH0038", Some("https://www.porsche.com/")),
    ]
}

#[derive(Default)]
struct Rows {
    by_id: BTreeMap<i32, Company>,
    last_id: i32,
}

impl Rows {
    fn isin_taken(&self, isin: &str, except: Option<i32>) -> bool {
        self.by_id.values().any(|c| c.isin == isin && Some(c.id) != except)
    }
}

/// Repository backed by an ordered map. Ids are assigned monotonically and
/// the ISIN uniqueness constraint is enforced under the write lock.
#[derive(Default)]
pub struct InMemoryCompanyRepository {
    rows: RwLock<Rows>,
}

impl InMemoryCompanyRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with [`reference_companies`]; new ids continue at 6.
    pub fn seeded() -> Self {
        Self::with_companies(reference_companies())
    }

    pub fn with_companies(companies: Vec<Company>) -> Self {
        let last_id = companies.iter().map(|c| c.id).max().unwrap_or(0);
        let by_id = companies.into_iter().map(|c| (c.id, c)).collect();
        Self { rows: RwLock::new(Rows { by_id, last_id }) }
    }
}

#[async_trait]
impl CompanyRepository for InMemoryCompanyRepository {
    async fn get_by_id(&self, id: i32) -> Result<Option<Company>, ServiceError> {
        Ok(self.rows.read().await.by_id.get(&id).cloned())
    }

    async fn get_by_isin(&self, isin: &str) -> Result<Option<Company>, ServiceError> {
        Ok(self.rows.read().await.by_id.values().find(|c| c.isin == isin).cloned())
    }

    async fn get_all(&self) -> Result<Vec<Company>, ServiceError> {
        Ok(self.rows.read().await.by_id.values().cloned().collect())
    }

    async fn add(&self, draft: &CompanyDraft) -> Result<Company, ServiceError> {
        let mut rows = self.rows.write().await;
        if rows.isin_taken(&draft.isin, None) {
            return Err(ServiceError::DuplicateKey(draft.isin.clone()));
        }
        rows.last_id += 1;
        let company = draft.clone().into_company(rows.last_id);
        rows.by_id.insert(company.id, company.clone());
        Ok(company)
    }

    async fn update(&self, company: &Company) -> Result<(), ServiceError> {
        let mut rows = self.rows.write().await;
        if !rows.by_id.contains_key(&company.id) {
            return Err(ServiceError::not_found("company", company.id));
        }
        if rows.isin_taken(&company.isin, Some(company.id)) {
            return Err(ServiceError::DuplicateKey(company.isin.clone()));
        }
        rows.by_id.insert(company.id, company.clone());
        Ok(())
    }

    async fn delete(&self, company: &Company) -> Result<(), ServiceError> {
        match self.rows.write().await.by_id.remove(&company.id) {
            Some(_) => Ok(()),
            None => Err(ServiceError::not_found("company", company.id)),
        }
    }
}
