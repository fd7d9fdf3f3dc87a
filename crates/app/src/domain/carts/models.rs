//! Cart Models

use crate::domain::{
    carts::{
        data::Quantity,
        records::{CartItemRecord, CartItemUuid, CartRecord},
    },
    catalog::records::{ProductRecord, VariantRecord},
};

/// A cart with every line joined to its catalog data.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    pub cart: CartRecord,
    pub lines: Vec<CartLine>,
}

impl Cart {
    /// Number of distinct line items, not the sum of quantities.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.lines.len()
    }
}

/// Cart Line
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub item_uuid: CartItemUuid,
    pub quantity: Quantity,
    pub product: ProductRecord,
    pub images: Vec<String>,
    pub variant: VariantRecord,
}

/// Result of changing one item's quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdatedCart {
    pub cart: CartRecord,
    pub item: CartItemRecord,
}
