//! Cart Errors

use tracing::error;

use hamper_app::domain::carts::CartsServiceError;

use crate::{carts::requests::INVALID_QUANTITY, errors::ApiError};

pub(crate) fn into_api_error(error: CartsServiceError) -> ApiError {
    match error {
        CartsServiceError::CartNotFound => ApiError::not_found("Cart not found"),
        CartsServiceError::ItemNotFound => ApiError::not_found("Cart item not found"),
        CartsServiceError::ProductNotFound => ApiError::not_found("Product not found"),
        CartsServiceError::VariantNotFound => ApiError::not_found("Variation not found"),
        CartsServiceError::InvalidQuantity(_) => ApiError::bad_request(INVALID_QUANTITY),
        CartsServiceError::TotalOutOfRange(_) => {
            ApiError::bad_request("Cart total exceeds the allowed maximum")
        }
        CartsServiceError::Sql(source) => {
            error!("cart storage failure: {source}");

            ApiError::internal()
        }
        error @ (CartsServiceError::InvalidReference
        | CartsServiceError::AlreadyExists
        | CartsServiceError::InvalidData) => {
            error!("cart data inconsistent: {error}");

            ApiError::internal()
        }
    }
}

#[cfg(test)]
mod tests {
    use hamper_app::{
        database::StorageError,
        domain::carts::{data::QuantityError, totals::TotalError},
    };
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn missing_entities_map_to_404_messages() {
        for (error, message) in [
            (CartsServiceError::CartNotFound, "Cart not found"),
            (CartsServiceError::ItemNotFound, "Cart item not found"),
            (CartsServiceError::ProductNotFound, "Product not found"),
            (CartsServiceError::VariantNotFound, "Variation not found"),
        ] {
            let mapped = into_api_error(error);

            assert_eq!(mapped.status(), StatusCode::NOT_FOUND);
            assert_eq!(mapped.message(), message);
        }
    }

    #[test]
    fn quantity_overflow_is_a_bad_request() {
        let mapped = into_api_error(QuantityError::TooLarge.into());

        assert_eq!(mapped, ApiError::bad_request(INVALID_QUANTITY));

        let mapped = into_api_error(TotalError::Overflow.into());

        assert_eq!(mapped.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn faults_are_hidden_behind_server_error() {
        for error in [
            CartsServiceError::Sql(StorageError::PoolTimedOut),
            CartsServiceError::InvalidReference,
            CartsServiceError::AlreadyExists,
            CartsServiceError::InvalidData,
        ] {
            assert_eq!(into_api_error(error), ApiError::internal());
        }
    }
}
