//! ProductImage entity - Images attached to a product.
//!
//! The `image` column stores an external object-storage reference, not the
//! bytes; URL resolution happens in the serialization layer. At most one
//! image per product may carry `is_main = true` - the write paths in
//! `core::image` clear sibling flags transactionally to uphold that.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product image database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product_images")]
pub struct Model {
    /// Unique identifier for the image row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the product this image belongs to
    pub product_id: i64,
    /// External storage reference; None when no upload exists yet
    pub image: Option<String>,
    /// Whether this is the product's main image (at most one per product)
    pub is_main: bool,
    /// Display position within the product's gallery, ascending
    pub ordering: i32,
}

/// Defines relationships between ProductImage and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each image belongs to one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
