//! Handlers for `/api/company`.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use common::types::CompanyDto;
use service::company::CompanyDraft;
use service::errors::ServiceError;

use crate::errors::JsonApiError;
use crate::observability;
use crate::routes::ServerState;

/// Count the failure under `operation` and translate it for the wire.
fn failed(operation: &'static str) -> impl FnOnce(ServiceError) -> JsonApiError {
    move |e| {
        observability::record(operation, e.kind());
        JsonApiError::from(e)
    }
}

fn payload(
    operation: &'static str,
    body: Result<Json<CompanyDto>, JsonRejection>,
) -> Result<CompanyDto, JsonApiError> {
    match body {
        Ok(Json(dto)) => Ok(dto),
        Err(rejection) => {
            observability::record(operation, "malformed");
            Err(JsonApiError::new(rejection.status(), "Malformed Payload", Some(rejection.body_text())))
        }
    }
}

fn path_param<T>(
    operation: &'static str,
    param: Result<Path<T>, PathRejection>,
) -> Result<T, JsonApiError> {
    match param {
        Ok(Path(value)) => Ok(value),
        Err(rejection) => {
            observability::record(operation, "malformed");
            Err(JsonApiError::new(rejection.status(), "Malformed Path", Some(rejection.body_text())))
        }
    }
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<CompanyDto>>, JsonApiError> {
    let companies = state.companies.get_all().await.map_err(failed("list"))?;
    observability::record("list", "ok");
    Ok(Json(companies.into_iter().map(CompanyDto::from).collect()))
}

pub async fn get(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<CompanyDto>, JsonApiError> {
    let id = path_param("get", id)?;
    match state.companies.get_by_id(id).await.map_err(failed("get"))? {
        Some(company) => {
            observability::record("get", "ok");
            Ok(Json(company.into()))
        }
        None => {
            observability::record("get", "not_found");
            Err(JsonApiError::not_found(format!("company {id} not found")))
        }
    }
}

pub async fn get_by_isin(
    State(state): State<ServerState>,
    isin: Result<Path<String>, PathRejection>,
) -> Result<Json<CompanyDto>, JsonApiError> {
    let isin = path_param("get_by_isin", isin)?;
    match state.companies.get_by_isin(&isin).await.map_err(failed("get_by_isin"))? {
        Some(company) => {
            observability::record("get_by_isin", "ok");
            Ok(Json(company.into()))
        }
        None => {
            observability::record("get_by_isin", "not_found");
            Err(JsonApiError::not_found(format!("company with isin {isin} not found")))
        }
    }
}

/// 201 with `Location: /api/company/{id}` and the stored company.
pub async fn create(
    State(state): State<ServerState>,
    body: Result<Json<CompanyDto>, JsonRejection>,
) -> Result<Response, JsonApiError> {
    let dto = payload("create", body)?;
    let created = state.companies.add(CompanyDraft::from(dto)).await.map_err(failed("create"))?;
    observability::record("create", "ok");
    let location = format!("/api/company/{}", created.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(CompanyDto::from(created))).into_response())
}

pub async fn update(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
    body: Result<Json<CompanyDto>, JsonRejection>,
) -> Result<StatusCode, JsonApiError> {
    let id = path_param("update", id)?;
    let dto = payload("update", body)?;
    state.companies.update(id, CompanyDraft::from(dto)).await.map_err(failed("update"))?;
    observability::record("update", "ok");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, JsonApiError> {
    let id = path_param("delete", id)?;
    state.companies.delete(id).await.map_err(failed("delete"))?;
    observability::record("delete", "ok");
    Ok(StatusCode::NO_CONTENT)
}
