//! Product and service CRUD.
//!
//! Both record kinds share one operation set: list (ordered by id, optionally
//! paginated), get, create, partial update and delete-returning-the-record.

pub mod domain;
pub mod products;
pub mod services;

pub use domain::{ImageUpload, ProductInput, ServiceInput};
