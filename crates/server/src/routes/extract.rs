//! Request extractors that report rejections as `{"message": ...}`.

use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Query, Request},
    extract::rejection::{JsonRejection, QueryRejection},
    http::header::CONTENT_TYPE,
    Json,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use service::catalog::{ImageUpload, ProductInput};
use service::coerce::IntInput;
use service::pagination::Pagination;

use crate::errors::ApiError;

/// Multipart field that carries the product image.
pub const IMAGE_FIELD: &str = "image";

/// `Json<T>` with every body rejection (syntax, missing field, wrong content
/// type) mapped to 400.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(json_rejection(rejection)),
        }
    }
}

fn json_rejection(rejection: JsonRejection) -> ApiError {
    ApiError::bad_request(rejection.body_text())
}

/// `:id` path segment; anything that is not an `i32` is a 400.
pub fn parse_id(raw: &str) -> Result<i32, ApiError> {
    raw.trim().parse::<i32>().map_err(|_| ApiError::bad_request("invalid id"))
}

/// `?page=&per_page=`; pagination applies only when either is given.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl PageQuery {
    pub fn from_request(query: Result<Query<PageQuery>, QueryRejection>) -> Result<Option<Pagination>, ApiError> {
        let Query(q) = query.map_err(|e| ApiError::bad_request(e.body_text()))?;
        if q.page.is_none() && q.per_page.is_none() {
            return Ok(None);
        }
        let defaults = Pagination::default();
        Ok(Some(Pagination {
            page: q.page.unwrap_or(defaults.page),
            per_page: q.per_page.unwrap_or(defaults.per_page),
        }))
    }
}

/// Product fields from either a JSON body or a `multipart/form-data` body with
/// an optional `image` file part.
pub struct ProductForm {
    pub input: ProductInput,
    pub image: Option<ImageUpload>,
}

#[async_trait]
impl<S> FromRequest<S> for ProductForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.trim_start().to_ascii_lowercase().starts_with("multipart/form-data"))
            .unwrap_or(false);

        if !is_multipart {
            let JsonBody(input) = JsonBody::<ProductInput>::from_request(req, state).await?;
            return Ok(Self { input, image: None });
        }

        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;
        read_multipart(&mut multipart).await
    }
}

async fn read_multipart(multipart: &mut Multipart) -> Result<ProductForm, ApiError> {
    let mut input = ProductInput::default();
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == IMAGE_FIELD {
            let file_name = field.file_name().map(str::to_string);
            let bytes = field.bytes().await.map_err(|e| ApiError::bad_request(e.body_text()))?;
            // browsers send an empty part when no file was chosen
            if bytes.is_empty() && file_name.as_deref().unwrap_or_default().is_empty() {
                continue;
            }
            image = Some(ImageUpload { file_name, bytes: bytes.to_vec() });
            continue;
        }
        let text = field.text().await.map_err(|e| ApiError::bad_request(e.body_text()))?;
        match name.as_str() {
            "name" => input.name = Some(text),
            "description" => input.description = Some(text),
            "price" => input.price = Some(IntInput::Text(text)),
            _ => {}
        }
    }
    Ok(ProductForm { input, image })
}
