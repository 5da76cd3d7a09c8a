//! Service layer providing business-oriented operations on top of models.
//! - Separates business logic from data access and from the HTTP framework.
//! - Reuses validation and entity definitions in the `models` crate.
//! - Owns authentication (hashing, tokens), catalog CRUD and upload storage.

pub mod errors;
pub mod auth;
pub mod catalog;
pub mod coerce;
pub mod pagination;
pub mod storage;
#[cfg(test)]
pub mod test_support;
