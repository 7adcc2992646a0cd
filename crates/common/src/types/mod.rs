use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Wire representation of a company.
///
/// `id` is absent on create requests and always present in responses.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CompanyDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    pub name: String,
    pub exchange: String,
    pub ticker: String,
    pub isin: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}
