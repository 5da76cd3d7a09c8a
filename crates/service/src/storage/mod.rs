//! Storage abstractions for service layer
//!
//! File-backed stores that live next to the database: currently the product
//! image upload directory.

pub mod uploads;

pub use uploads::UploadStore;
