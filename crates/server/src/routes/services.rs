use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    Json,
};

use models::service::Model as Service;
use service::catalog::{services, ServiceInput};

use crate::errors::ApiError;
use crate::routes::extract::{parse_id, JsonBody, PageQuery};
use crate::state::ServerState;

#[utoipa::path(get, path = "/services", tag = "services", params(("page" = Option<u32>, Query, description = "1-based page"), ("per_page" = Option<u32>, Query, description = "items per page")), responses((status = 200, description = "OK", body = [crate::openapi::ServiceDoc])))]
pub async fn list(
    State(state): State<ServerState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<Vec<Service>>, ApiError> {
    let page = PageQuery::from_request(query)?;
    Ok(Json(services::list(&state.db, page).await?))
}

#[utoipa::path(get, path = "/services/{id}", tag = "services", params(("id" = i32, Path, description = "Service id")), responses((status = 200, description = "OK", body = crate::openapi::ServiceDoc), (status = 404, description = "Not Found", body = crate::openapi::ErrorResponse)))]
pub async fn get(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Service>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(services::get(&state.db, id).await?))
}

#[utoipa::path(post, path = "/services", tag = "services", security(("bearer" = [])), request_body = crate::openapi::ServiceRequest, responses((status = 201, description = "Created", body = crate::openapi::ServiceDoc), (status = 400, description = "Bad Request", body = crate::openapi::ErrorResponse), (status = 401, description = "Missing token"), (status = 403, description = "Invalid token")))]
pub async fn create(
    State(state): State<ServerState>,
    JsonBody(input): JsonBody<ServiceInput>,
) -> Result<(StatusCode, Json<Service>), ApiError> {
    let created = services::create(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(put, path = "/services/{id}", tag = "services", security(("bearer" = [])), params(("id" = i32, Path, description = "Service id")), request_body = crate::openapi::ServiceRequest, responses((status = 200, description = "OK", body = crate::openapi::ServiceDoc), (status = 400, description = "Bad Request", body = crate::openapi::ErrorResponse), (status = 404, description = "Not Found", body = crate::openapi::ErrorResponse)))]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<ServiceInput>,
) -> Result<Json<Service>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(services::update(&state.db, id, input).await?))
}

#[utoipa::path(delete, path = "/services/{id}", tag = "services", security(("bearer" = [])), params(("id" = i32, Path, description = "Service id")), responses((status = 200, description = "Deleted record", body = crate::openapi::ServiceDoc), (status = 404, description = "Not Found", body = crate::openapi::ErrorResponse)))]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Service>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(services::delete(&state.db, id).await?))
}
