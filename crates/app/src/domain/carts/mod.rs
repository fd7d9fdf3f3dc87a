//! Carts

mod assembly;
pub mod data;
pub mod errors;
pub mod models;
pub mod records;
mod repositories;
pub mod service;
pub mod totals;

pub use assembly::AssemblyError;
pub use errors::CartsServiceError;
pub use service::*;
