//! Drives a live server over HTTP through the caching client.

use std::sync::Arc;
use std::time::Duration;

use client::{ClientError, CompanyCache, CompanyClient, HttpCompanyBackend};
use common::types::CompanyDto;
use service::company::repo::memory::InMemoryCompanyRepository;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use server::routes::{self, ServerState};

async fn start_server() -> anyhow::Result<String> {
    let app = routes::build_router(
        ServerState::new(Arc::new(InMemoryCompanyRepository::seeded())),
        CorsLayer::very_permissive(),
    );
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });
    Ok(format!("http://{}/api", addr))
}

fn intel() -> CompanyDto {
    CompanyDto {
        id: None,
        name: "Intel Corporation".into(),
        exchange: "NASDAQ".into(),
        ticker: "INTC".into(),
        isin: "US4581401001".into(),
        website: None,
    }
}

#[tokio::test]
async fn e2e_crud_through_cached_client() -> anyhow::Result<()> {
    let base_url = start_server().await?;
    let client = CompanyClient::new(
        Arc::new(HttpCompanyBackend::new(base_url)),
        CompanyCache::new(Duration::from_secs(300)),
    );

    assert_eq!(client.list().await?.len(), 5);

    let created = client.create(&intel()).await?;
    assert_eq!(created.id, Some(6));
    assert_eq!(client.list().await?.len(), 6);

    let heineken = client.get_by_isin("NL0000009165").await?.expect("seeded");
    assert_eq!(heineken.id, Some(3));

    let renamed = CompanyDto { id: Some(6), name: "Intel Corp.".into(), ..intel() };
    client.get(6).await?;
    client.update(6, &renamed).await?;
    assert_eq!(client.get(6).await?.map(|c| c.name), Some("Intel Corp.".to_string()));

    client.delete(6).await?;
    assert!(client.get(6).await?.is_none());
    assert_eq!(client.list().await?.len(), 5);
    Ok(())
}

#[tokio::test]
async fn e2e_errors_surface_from_server() -> anyhow::Result<()> {
    let base_url = start_server().await?;
    let client = CompanyClient::from_config(&configs::ClientConfig { base_url, ..Default::default() });

    let dup = CompanyDto { isin: "US0378331005".into(), ..intel() };
    let err = client.create(&dup).await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 400, .. }), "{err}");

    let err = client.delete(999).await.unwrap_err();
    assert!(err.is_not_found());

    let mismatch = CompanyDto { id: Some(2), ..intel() };
    let err = client.update(1, &mismatch).await.unwrap_err();
    assert!(err.to_string().contains("Identity Mismatch"), "{err}");
    Ok(())
}

#[tokio::test]
async fn e2e_cache_serves_stale_list_until_evicted() -> anyhow::Result<()> {
    let base_url = start_server().await?;
    let client = CompanyClient::new(
        Arc::new(HttpCompanyBackend::new(base_url.clone())),
        CompanyCache::new(Duration::from_secs(300)),
    );
    assert_eq!(client.list().await?.len(), 5);

    // A write that bypasses this client is not visible until the entry is evicted.
    let resp = reqwest::Client::new().delete(format!("{base_url}/company/2")).send().await?;
    assert_eq!(resp.status(), reqwest::StatusCode::NO_CONTENT);
    assert_eq!(client.list().await?.len(), 5);

    client.delete(4).await?;
    assert_eq!(client.list().await?.len(), 3);
    Ok(())
}

#[tokio::test]
async fn e2e_isin_with_reserved_characters_round_trips() -> anyhow::Result<()> {
    let base_url = start_server().await?;
    let client = CompanyClient::new(
        Arc::new(HttpCompanyBackend::new(base_url)),
        CompanyCache::new(Duration::from_secs(300)),
    );
    let odd = CompanyDto { isin: "AB/CD?EF#123".into(), ..intel() };
    let created = client.create(&odd).await?;

    let found = client.get_by_isin("AB/CD?EF#123").await?;
    assert_eq!(found.and_then(|c| c.id), created.id);
    Ok(())
}
