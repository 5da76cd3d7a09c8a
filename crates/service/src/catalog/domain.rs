use serde::Deserialize;

use crate::coerce::IntInput;
use crate::errors::ServiceError;

/// Product fields as submitted. Every field is optional so the same shape
/// serves create (all required) and partial update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<IntInput>,
}

/// Service fields as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<IntInput>,
    #[serde(default)]
    pub duration: Option<IntInput>,
}

/// A product image received with the request, not yet stored.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

pub(crate) fn required<T>(field: &str, value: Option<T>) -> Result<T, ServiceError> {
    value.ok_or_else(|| ServiceError::Validation(format!("{field} is required")))
}

pub(crate) fn resolve_int(field: &str, value: Option<&IntInput>) -> Result<Option<i64>, ServiceError> {
    value.map(|v| v.resolve(field)).transpose()
}
