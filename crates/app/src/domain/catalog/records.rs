//! Catalog Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product Record
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Variant UUID
pub type VariantUuid = TypedUuid<VariantRecord>;

/// Product Variant Record
#[derive(Debug, Clone, PartialEq)]
pub struct VariantRecord {
    pub uuid: VariantUuid,
    pub product_uuid: ProductUuid,
    pub name: String,
    pub sku: Option<String>,

    /// Unit price in minor currency units.
    pub price: u64,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Image UUID
pub type ImageUuid = TypedUuid<ImageRecord>;

/// Product Image Record
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRecord {
    pub uuid: ImageUuid,
    pub product_uuid: ProductUuid,
    pub image_url: String,
    pub position: i32,
}
