//! Product entity - The central catalog record.
//!
//! A product owns its images, pricing plans, and reviews (all removed when
//! the product is deleted) and belongs to any number of categories. The
//! description and notes fields hold opaque HTML produced by an external
//! rich-text editor; this crate stores and serves them verbatim.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display title
    pub title: String,
    /// Rich-text description, stored as opaque HTML
    #[sea_orm(column_type = "Text")]
    pub description: String,
    /// Rich-text internal notes, stored as opaque HTML (may be empty)
    #[sea_orm(column_type = "Text")]
    pub notes: String,
    /// Base price; None when the product is only sold through plans
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    pub price: Option<Decimal>,
    /// Visibility toggle - inactive products are hidden from public reads
    pub status: bool,
    /// When the product was created
    pub created_at: DateTime,
    /// When the product was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between Product and its dependent entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One product has many images
    #[sea_orm(has_many = "super::product_image::Entity")]
    Images,
    /// One product has many pricing plans
    #[sea_orm(has_many = "super::product_plan::Entity")]
    Plans,
    /// One product has many customer reviews
    #[sea_orm(has_many = "super::review::Entity")]
    Reviews,
}

impl Related<super::product_image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Images.def()
    }
}

impl Related<super::product_plan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Plans.def()
    }
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        super::product_category::Relation::Category.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::product_category::Relation::Product.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
