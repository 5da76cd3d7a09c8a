pub mod errors;
pub mod db;
pub mod validate;
pub mod user;
pub mod product;
pub mod service;

#[cfg(test)]
mod tests;
