use common::types::CompanyDto;
use serde::{Deserialize, Serialize};

/// A stored company. `id` is assigned by the repository and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: i32,
    pub name: String,
    pub exchange: String,
    pub ticker: String,
    pub isin: String,
    pub website: Option<String>,
}

/// Candidate values for a create or update.
///
/// `id` is whatever the caller sent; it is ignored on create and must match
/// the target id on update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyDraft {
    pub id: Option<i32>,
    pub name: String,
    pub exchange: String,
    pub ticker: String,
    pub isin: String,
    pub website: Option<String>,
}

impl CompanyDraft {
    /// Bind the draft to a stored identity.
    pub fn into_company(self, id: i32) -> Company {
        Company {
            id,
            name: self.name,
            exchange: self.exchange,
            ticker: self.ticker,
            isin: self.isin,
            website: self.website,
        }
    }
}

impl From<models::company::Model> for Company {
    fn from(m: models::company::Model) -> Self {
        Company { id: m.id, name: m.name, exchange: m.exchange, ticker: m.ticker, isin: m.isin, website: m.website }
    }
}

impl From<CompanyDto> for CompanyDraft {
    fn from(dto: CompanyDto) -> Self {
        CompanyDraft {
            id: dto.id,
            name: dto.name,
            exchange: dto.exchange,
            ticker: dto.ticker,
            isin: dto.isin,
            website: dto.website,
        }
    }
}

impl From<Company> for CompanyDto {
    fn from(c: Company) -> Self {
        CompanyDto {
            id: Some(c.id),
            name: c.name,
            exchange: c.exchange,
            ticker: c.ticker,
            isin: c.isin,
            website: c.website,
        }
    }
}
