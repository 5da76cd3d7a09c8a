use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    Json,
};

use models::product::Model as Product;
use service::catalog::products;

use crate::errors::ApiError;
use crate::metrics;
use crate::routes::extract::{parse_id, PageQuery, ProductForm};
use crate::state::ServerState;

#[utoipa::path(get, path = "/products", tag = "products", params(("page" = Option<u32>, Query, description = "1-based page"), ("per_page" = Option<u32>, Query, description = "items per page")), responses((status = 200, description = "All products ordered by id", body = [crate::openapi::ProductDoc])))]
pub async fn list(
    State(state): State<ServerState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let page = PageQuery::from_request(query)?;
    Ok(Json(products::list(&state.db, page).await?))
}

#[utoipa::path(get, path = "/products/{id}", tag = "products", params(("id" = i32, Path, description = "Product id")), responses((status = 200, description = "OK", body = crate::openapi::ProductDoc), (status = 404, description = "Not Found", body = crate::openapi::ErrorResponse)))]
pub async fn get(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Product>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(products::get(&state.db, id).await?))
}

#[utoipa::path(post, path = "/products", tag = "products", security(("bearer" = [])), request_body(content = crate::openapi::ProductFormDoc, content_type = "multipart/form-data"), responses((status = 201, description = "Created", body = crate::openapi::ProductDoc), (status = 400, description = "Bad Request", body = crate::openapi::ErrorResponse), (status = 401, description = "Missing token"), (status = 403, description = "Invalid token")))]
pub async fn create(State(state): State<ServerState>, form: ProductForm) -> Result<(StatusCode, Json<Product>), ApiError> {
    let with_image = form.image.is_some();
    let created = products::create(&state.db, &state.uploads, form.input, form.image).await?;
    if with_image {
        metrics::UPLOADS_STORED_TOTAL.inc();
    }
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(put, path = "/products/{id}", tag = "products", security(("bearer" = [])), params(("id" = i32, Path, description = "Product id")), request_body(content = crate::openapi::ProductFormDoc, content_type = "multipart/form-data"), responses((status = 200, description = "OK", body = crate::openapi::ProductDoc), (status = 400, description = "Bad Request", body = crate::openapi::ErrorResponse), (status = 404, description = "Not Found", body = crate::openapi::ErrorResponse)))]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    form: ProductForm,
) -> Result<Json<Product>, ApiError> {
    let id = parse_id(&id)?;
    let with_image = form.image.is_some();
    let out = products::update(&state.db, &state.uploads, id, form.input, form.image).await?;
    if with_image {
        metrics::UPLOADS_STORED_TOTAL.inc();
    }
    if out.removed_image.is_some() {
        metrics::UPLOADS_REMOVED_TOTAL.inc();
    }
    Ok(Json(out.product))
}

#[utoipa::path(delete, path = "/products/{id}", tag = "products", security(("bearer" = [])), params(("id" = i32, Path, description = "Product id")), responses((status = 200, description = "Deleted record", body = crate::openapi::ProductDoc), (status = 404, description = "Not Found", body = crate::openapi::ErrorResponse)))]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Product>, ApiError> {
    let id = parse_id(&id)?;
    let deleted = products::delete(&state.db, &state.uploads, id).await?;
    if deleted.image_removed {
        metrics::UPLOADS_REMOVED_TOTAL.inc();
    }
    Ok(Json(deleted.product))
}
