//! Joins cart items to their catalog records.

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::domain::{
    carts::{models::CartLine, records::CartItemRecord},
    catalog::records::{ImageRecord, ProductRecord, ProductUuid, VariantRecord, VariantUuid},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AssemblyError {
    #[error("cart item references unknown product {0}")]
    MissingProduct(ProductUuid),

    #[error("cart item references unknown variant {0}")]
    MissingVariant(VariantUuid),
}

/// Catalog records for a set of cart items, indexed by uuid.
#[derive(Debug, Default)]
pub(crate) struct CatalogIndex {
    products: FxHashMap<ProductUuid, ProductRecord>,
    variants: FxHashMap<VariantUuid, VariantRecord>,
    images: FxHashMap<ProductUuid, Vec<String>>,
}

impl CatalogIndex {
    /// Images are expected in display order; that order is kept per product.
    pub(crate) fn new(
        products: Vec<ProductRecord>,
        variants: Vec<VariantRecord>,
        images: Vec<ImageRecord>,
    ) -> Self {
        let mut index = Self {
            products: products.into_iter().map(|p| (p.uuid, p)).collect(),
            variants: variants.into_iter().map(|v| (v.uuid, v)).collect(),
            images: FxHashMap::default(),
        };

        for image in images {
            index
                .images
                .entry(image.product_uuid)
                .or_default()
                .push(image.image_url);
        }

        index
    }

    pub(crate) fn line(&self, item: &CartItemRecord) -> Result<CartLine, AssemblyError> {
        let product = self
            .products
            .get(&item.product_uuid)
            .ok_or(AssemblyError::MissingProduct(item.product_uuid))?;

        let variant = self
            .variants
            .get(&item.variant_uuid)
            .ok_or(AssemblyError::MissingVariant(item.variant_uuid))?;

        Ok(CartLine {
            item_uuid: item.uuid,
            quantity: item.quantity,
            product: product.clone(),
            images: self
                .images
                .get(&item.product_uuid)
                .cloned()
                .unwrap_or_default(),
            variant: variant.clone(),
        })
    }

    /// Build one line per item, in item order.
    pub(crate) fn lines(&self, items: &[CartItemRecord]) -> Result<Vec<CartLine>, AssemblyError> {
        items.iter().map(|item| self.line(item)).collect()
    }
}
