//! Cart request bodies and their validation.
//!
//! Fields arrive as loosely typed JSON so that a missing field and a
//! wrongly typed one get different messages. A field counts as missing when it
//! is absent, `null`, `false`, `0` or `""`.

use hamper_app::{
    domain::carts::data::{MAX_QUANTITY, NewCartItem, Quantity},
    uuids::TypedUuid,
};
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ApiError;

pub(crate) const MISSING_FIELDS: &str = "Please provide all required fields";
pub(crate) const INVALID_QUANTITY: &str = "Quantity must be a positive number";
pub(crate) const INVALID_IDENTIFIER: &str = "Invalid identifier";

/// Add To Cart Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddToCartRequest {
    /// Product to add
    #[salvo(schema(value_type = Option<String>))]
    pub product_id: Option<Value>,

    /// Variant of that product
    #[salvo(schema(value_type = Option<String>))]
    pub variation_id: Option<Value>,

    /// Units to add; a positive integer or numeric string
    #[salvo(schema(value_type = Option<u64>))]
    pub quantity: Option<Value>,
}

impl AddToCartRequest {
    pub(crate) fn validate(self) -> Result<NewCartItem, ApiError> {
        let (Some(product_id), Some(variation_id), Some(quantity)) = (
            present(self.product_id),
            present(self.variation_id),
            present(self.quantity),
        ) else {
            return Err(ApiError::bad_request(MISSING_FIELDS));
        };

        let quantity = parse_quantity(&quantity)?;

        Ok(NewCartItem {
            product_uuid: parse_identifier(&product_id)?,
            variant_uuid: parse_identifier(&variation_id)?,
            quantity,
        })
    }
}

/// Update Cart Item Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCartItemRequest {
    /// New quantity; a positive integer or numeric string
    #[salvo(schema(value_type = Option<u64>))]
    pub quantity: Option<Value>,
}

impl UpdateCartItemRequest {
    pub(crate) fn validate(self) -> Result<Quantity, ApiError> {
        let quantity = present(self.quantity).ok_or(ApiError::bad_request(MISSING_FIELDS))?;

        parse_quantity(&quantity)
    }
}

/// Parse an identifier taken from the request path.
pub(crate) fn parse_path_identifier<T>(raw: &str) -> Result<TypedUuid<T>, ApiError> {
    if raw.is_empty() {
        return Err(ApiError::bad_request(MISSING_FIELDS));
    }

    raw.parse()
        .map_err(|_malformed| ApiError::bad_request(INVALID_IDENTIFIER))
}

fn present(value: Option<Value>) -> Option<Value> {
    value.filter(|value| match value {
        Value::Null | Value::Bool(false) => false,
        Value::Number(number) => number.as_f64().is_some_and(|n| n.abs() > 0.0),
        Value::String(string) => !string.is_empty(),
        Value::Bool(true) | Value::Array(_) | Value::Object(_) => true,
    })
}

fn parse_quantity(value: &Value) -> Result<Quantity, ApiError> {
    let raw = match value {
        Value::Number(number) => number
            .as_u64()
            .or_else(|| number.as_f64().and_then(whole_number)),
        Value::String(string) => {
            let string = string.trim();

            string
                .parse::<u64>()
                .ok()
                .or_else(|| string.parse::<f64>().ok().and_then(whole_number))
        }
        _ => None,
    };

    raw.and_then(|raw| Quantity::new(raw).ok())
        .ok_or(ApiError::bad_request(INVALID_QUANTITY))
}

/// Accept floats such as `2.0` that carry a whole, in-range quantity.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "sign, fraction and range are checked before the cast"
)]
fn whole_number(value: f64) -> Option<u64> {
    (value.is_finite()
        && value >= 1.0
        && value.fract().abs() < f64::EPSILON
        && value <= f64::from(MAX_QUANTITY))
    .then(|| value as u64)
}

fn parse_identifier<T>(value: &Value) -> Result<TypedUuid<T>, ApiError> {
    value
        .as_str()
        .and_then(|raw| raw.parse().ok())
        .ok_or(ApiError::bad_request(INVALID_IDENTIFIER))
}
