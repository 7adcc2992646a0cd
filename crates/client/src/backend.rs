use async_trait::async_trait;
use common::types::CompanyDto;
use reqwest::{Response, StatusCode, Url};
use serde::Deserialize;
use tracing::debug;

use crate::error::ClientError;

/// The authoritative source behind the cache.
///
/// `get` and `get_by_isin` return `Ok(None)` when the company does not exist.
#[async_trait]
pub trait CompanyBackend: Send + Sync {
    async fn list(&self) -> Result<Vec<CompanyDto>, ClientError>;
    async fn get(&self, id: i32) -> Result<Option<CompanyDto>, ClientError>;
    async fn get_by_isin(&self, isin: &str) -> Result<Option<CompanyDto>, ClientError>;
    async fn create(&self, company: &CompanyDto) -> Result<CompanyDto, ClientError>;
    async fn update(&self, id: i32, company: &CompanyDto) -> Result<(), ClientError>;
    async fn delete(&self, id: i32) -> Result<(), ClientError>;
}

/// Error body produced by the API server.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    #[serde(default)]
    detail: Option<String>,
}

/// Backend talking to the company API over HTTP.
#[derive(Clone)]
pub struct HttpCompanyBackend {
    http: reqwest::Client,
    base_url: String,
}

impl HttpCompanyBackend {
    /// `base_url` is the API root, e.g. `http://127.0.0.1:8080/api`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    /// `{base_url}/company/{segments..}`, each segment percent-encoded.
    fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .push("company")
            .extend(segments);
        Ok(url)
    }
}

/// Turn a non-success response into `ClientError::Api`, keeping the server's message.
async fn into_api_error(resp: Response) -> ClientError {
    let status = resp.status().as_u16();
    let text = resp.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => match body.detail {
            Some(detail) => format!("{}: {}", body.error, detail),
            None => body.error,
        },
        Err(_) => text,
    };
    ClientError::Api { status, message }
}

async fn ensure_success(resp: Response) -> Result<Response, ClientError> {
    if resp.status().is_success() {
        Ok(resp)
    } else {
        Err(into_api_error(resp).await)
    }
}

async fn optional_company(resp: Response) -> Result<Option<CompanyDto>, ClientError> {
    if resp.status() == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    let resp = ensure_success(resp).await?;
    Ok(Some(resp.json::<CompanyDto>().await?))
}

#[async_trait]
impl CompanyBackend for HttpCompanyBackend {
    async fn list(&self) -> Result<Vec<CompanyDto>, ClientError> {
        let resp = self.http.get(self.url(&[])?).send().await?;
        let resp = ensure_success(resp).await?;
        let companies = resp.json::<Vec<CompanyDto>>().await?;
        debug!(count = companies.len(), "fetched company list");
        Ok(companies)
    }

    async fn get(&self, id: i32) -> Result<Option<CompanyDto>, ClientError> {
        let resp = self.http.get(self.url(&[id.to_string().as_str()])?).send().await?;
        optional_company(resp).await
    }

    async fn get_by_isin(&self, isin: &str) -> Result<Option<CompanyDto>, ClientError> {
        let resp = self.http.get(self.url(&["isin", isin])?).send().await?;
        optional_company(resp).await
    }

    async fn create(&self, company: &CompanyDto) -> Result<CompanyDto, ClientError> {
        let resp = self.http.post(self.url(&[])?).json(company).send().await?;
        let resp = ensure_success(resp).await?;
        Ok(resp.json::<CompanyDto>().await?)
    }

    async fn update(&self, id: i32, company: &CompanyDto) -> Result<(), ClientError> {
        let resp = self.http.put(self.url(&[id.to_string().as_str()])?).json(company).send().await?;
        ensure_success(resp).await?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), ClientError> {
        let resp = self.http.delete(self.url(&[id.to_string().as_str()])?).send().await?;
        ensure_success(resp).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_built_under_company_resource() {
        let backend = HttpCompanyBackend::new("http://localhost:8080/api/");
        assert_eq!(backend.url(&[]).unwrap().as_str(), "http://localhost:8080/api/company");
        assert_eq!(backend.url(&["7"]).unwrap().as_str(), "http://localhost:8080/api/company/7");
        assert_eq!(
            backend.url(&["isin", "NL0000009165"]).unwrap().as_str(),
            "http://localhost:8080/api/company/isin/NL0000009165"
        );
    }

    #[test]
    fn isin_is_encoded_as_a_single_segment() {
        let backend = HttpCompanyBackend::new("http://localhost:8080/api");
        let url = backend.url(&["isin", "AB/CD?EF#123"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/company/isin/AB%2FCD%3FEF%23123");
        assert_eq!(url.path_segments().unwrap().count(), 4);
    }

    #[test]
    fn invalid_base_url_is_reported() {
        let backend = HttpCompanyBackend::new("not a url");
        assert!(matches!(backend.url(&[]), Err(ClientError::InvalidUrl(_))));
    }
}
