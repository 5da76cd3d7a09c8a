//! Field checks shared by the entity constructors and the service layer.

use crate::errors::ModelError;

pub fn required_text(field: &str, value: &str) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::Validation(format!("{field} is required")));
    }
    Ok(())
}

pub fn non_negative(field: &str, value: i64) -> Result<(), ModelError> {
    if value < 0 {
        return Err(ModelError::Validation(format!("{field} must not be negative")));
    }
    Ok(())
}

pub fn email(value: &str) -> Result<(), ModelError> {
    let trimmed = value.trim();
    match trimmed.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => Ok(()),
        _ => Err(ModelError::Validation("invalid email".into())),
    }
}
