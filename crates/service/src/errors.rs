use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Error from an `ActiveModel::update`; a row that vanished after it was
    /// read is reported as not found.
    pub fn from_update(e: sea_orm::DbErr, entity: &str) -> Self {
        match e {
            sea_orm::DbErr::RecordNotUpdated => Self::not_found(entity),
            other => Self::Db(other.to_string()),
        }
    }

    /// Client-facing text without the variant prefix.
    pub fn message(&self) -> String {
        match self {
            ServiceError::Validation(m)
            | ServiceError::NotFound(m)
            | ServiceError::Db(m)
            | ServiceError::Storage(m) => m.clone(),
            ServiceError::Model(models::errors::ModelError::Validation(m))
            | ServiceError::Model(models::errors::ModelError::Db(m)) => m.clone(),
        }
    }
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(e: sea_orm::DbErr) -> Self {
        ServiceError::Db(e.to_string())
    }
}
