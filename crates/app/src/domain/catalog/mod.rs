//! Catalog
//!
//! Read-only access to the products, variants and images that cart items
//! point at.

pub mod records;
mod repository;

pub(crate) use repository::PgCatalogRepository;
