use std::sync::Arc;

use axum::{http::StatusCode, routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;
use service::company::{CompanyRepository, CompanyService};

use crate::observability;

pub mod companies;

/// Shared handler state.
#[derive(Clone)]
pub struct ServerState {
    pub companies: Arc<CompanyService<dyn CompanyRepository>>,
}

impl ServerState {
    pub fn new(repo: Arc<dyn CompanyRepository>) -> Self {
        Self { companies: Arc::new(CompanyService::new(repo)) }
    }
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn metrics() -> (StatusCode, String) {
    observability::encode_metrics()
}

/// Build the full application router: company resource, health and metrics.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/api/company", get(companies::list).post(companies::create))
        .route(
            "/api/company/:id",
            get(companies::get).put(companies::update).delete(companies::delete),
        )
        .route("/api/company/isin/:isin", get(companies::get_by_isin));

    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .merge(api)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
