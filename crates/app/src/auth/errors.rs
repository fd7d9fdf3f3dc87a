//! Auth service errors.

use sqlx::Error;
use thiserror::Error;

use crate::auth::token::TokenError;

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("token not found")]
    NotFound,

    #[error("storage error")]
    Sql(#[from] Error),

    #[error("token processing error")]
    Token(#[from] TokenError),
}
