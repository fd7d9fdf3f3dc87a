//! Carts service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::carts::{assembly::AssemblyError, data::QuantityError, totals::TotalError};

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("cart not found")]
    CartNotFound,

    #[error("cart item not found")]
    ItemNotFound,

    #[error("product not found")]
    ProductNotFound,

    #[error("variant not found")]
    VariantNotFound,

    #[error("invalid quantity")]
    InvalidQuantity(#[from] QuantityError),

    #[error("cart total out of range")]
    TotalOutOfRange(#[from] TotalError),

    #[error("related resource not found")]
    InvalidReference,

    #[error("cart item already exists")]
    AlreadyExists,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CartsServiceError {
    fn from(error: Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation | ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

impl From<AssemblyError> for CartsServiceError {
    fn from(_error: AssemblyError) -> Self {
        Self::InvalidReference
    }
}
