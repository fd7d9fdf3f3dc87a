//! Cart response bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hamper_app::domain::{
    carts::{
        models::{Cart, CartLine, UpdatedCart},
        records::{CartItemRecord, CartRecord},
    },
    catalog::records::{ProductRecord, VariantRecord},
};

/// Successful cart response: `{ "success": true, "data": { "cart": ... } }`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartEnvelope {
    /// Always `true`
    pub success: bool,

    pub data: CartData,
}

impl From<CartResponse> for CartEnvelope {
    fn from(cart: CartResponse) -> Self {
        Self {
            success: true,
            data: CartData { cart },
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartData {
    pub cart: CartResponse,
}

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// The unique identifier of the cart
    pub uuid: Uuid,

    /// The owner of the cart
    pub user_uuid: Uuid,

    /// Running total in minor currency units
    pub total_price: u64,

    /// Number of distinct line items; only present when reading the cart
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_items: Option<usize>,

    /// Populated cart lines
    pub items: Vec<CartLineResponse>,

    /// The date and time the cart was created
    pub created_at: String,

    /// The date and time the cart was last updated
    pub updated_at: String,
}

impl CartResponse {
    fn from_record(cart: CartRecord, items: Vec<CartLineResponse>) -> Self {
        Self {
            uuid: cart.uuid.into_uuid(),
            user_uuid: cart.user_uuid.into_uuid(),
            total_price: cart.total_price,
            total_items: None,
            items,
            created_at: cart.created_at.to_string(),
            updated_at: cart.updated_at.to_string(),
        }
    }

    /// A cart as returned after adding an item.
    pub(crate) fn populated(cart: Cart) -> Self {
        let items = cart.lines.into_iter().map(CartLineResponse::from).collect();

        Self::from_record(cart.cart, items)
    }

    /// A cart as returned by a read, carrying the line count.
    pub(crate) fn with_count(cart: Cart) -> Self {
        let total_items = cart.total_items();

        Self {
            total_items: Some(total_items),
            ..Self::populated(cart)
        }
    }

    /// A cart with its item list cleared, as returned after a removal.
    pub(crate) fn emptied(cart: CartRecord) -> Self {
        Self::from_record(cart, Vec::new())
    }
}

/// Cart Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartLineResponse {
    pub product: ProductResponse,
    pub variation: VariationResponse,
    pub quantity: u32,

    /// Identifier to use with the item endpoints
    pub cart_item_id: Uuid,
}

impl From<CartLine> for CartLineResponse {
    fn from(line: CartLine) -> Self {
        Self {
            product: ProductResponse::new(line.product, line.images),
            variation: line.variant.into(),
            quantity: line.quantity.get(),
            cart_item_id: line.item_uuid.into_uuid(),
        }
    }
}

/// Product Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    pub uuid: Uuid,
    pub name: String,
    pub description: Option<String>,

    /// Image urls in display order
    pub images: Vec<String>,

    pub created_at: String,
    pub updated_at: String,
}

impl ProductResponse {
    fn new(product: ProductRecord, images: Vec<String>) -> Self {
        Self {
            uuid: product.uuid.into_uuid(),
            name: product.name,
            description: product.description,
            images,
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

/// Variation Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VariationResponse {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub name: String,
    pub sku: Option<String>,

    /// Unit price in minor currency units
    pub price: u64,

    pub created_at: String,
    pub updated_at: String,
}

impl From<VariantRecord> for VariationResponse {
    fn from(variant: VariantRecord) -> Self {
        Self {
            uuid: variant.uuid.into_uuid(),
            product_uuid: variant.product_uuid.into_uuid(),
            name: variant.name,
            sku: variant.sku,
            price: variant.price,
            created_at: variant.created_at.to_string(),
            updated_at: variant.updated_at.to_string(),
        }
    }
}

/// Successful item update response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdatedCartEnvelope {
    /// Always `true`
    pub success: bool,

    pub data: UpdatedCartData,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdatedCartData {
    pub cart: UpdatedCartResponse,
}

/// Cart fields plus the changed item in its stored form.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdatedCartResponse {
    pub uuid: Uuid,
    pub user_uuid: Uuid,
    pub total_price: u64,

    /// Holds exactly the updated item
    pub items: Vec<CartItemResponse>,

    pub created_at: String,
    pub updated_at: String,
}

impl From<UpdatedCart> for UpdatedCartEnvelope {
    fn from(UpdatedCart { cart, item }: UpdatedCart) -> Self {
        Self {
            success: true,
            data: UpdatedCartData {
                cart: UpdatedCartResponse {
                    uuid: cart.uuid.into_uuid(),
                    user_uuid: cart.user_uuid.into_uuid(),
                    total_price: cart.total_price,
                    items: vec![item.into()],
                    created_at: cart.created_at.to_string(),
                    updated_at: cart.updated_at.to_string(),
                },
            },
        }
    }
}

/// Stored Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    pub uuid: Uuid,
    pub cart_uuid: Uuid,
    pub product_uuid: Uuid,
    pub variant_uuid: Uuid,
    pub quantity: u32,
    pub created_at: String,
    pub updated_at: String,
}

impl From<CartItemRecord> for CartItemResponse {
    fn from(item: CartItemRecord) -> Self {
        Self {
            uuid: item.uuid.into_uuid(),
            cart_uuid: item.cart_uuid.into_uuid(),
            product_uuid: item.product_uuid.into_uuid(),
            variant_uuid: item.variant_uuid.into_uuid(),
            quantity: item.quantity.get(),
            created_at: item.created_at.to_string(),
            updated_at: item.updated_at.to_string(),
        }
    }
}
