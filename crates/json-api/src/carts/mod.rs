//! Cart endpoints.

pub(crate) mod errors;
pub(crate) mod handlers;
pub(crate) mod items;
pub(crate) mod requests;
pub(crate) mod responses;

pub(crate) use handlers::*;

use crate::{errors::ApiError, observability::observe_cart_operation};

/// Count the operation as `ok`, `rejected` (4xx) or `error` (5xx).
fn record_outcome<T>(operation: &str, result: &Result<T, ApiError>) {
    let outcome = match result {
        Ok(_) => "ok",
        Err(error) if error.status().is_server_error() => "error",
        Err(_) => "rejected",
    };

    observe_cart_operation(operation, outcome);
}
