//! Category entity - Groups products for storefront navigation.
//!
//! Categories carry a URL-safe slug (unique across the table) and an active
//! flag. Inactive categories stay in storage but are hidden from public
//! listings. Products and categories are linked many-to-many through the
//! `product_categories` junction table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Category database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    /// Unique identifier for the category
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-readable name (e.g., "Streaming", "Gift Cards")
    pub name: String,
    /// URL-safe identifier, auto-derived from the name when not supplied
    #[sea_orm(unique)]
    pub slug: String,
    /// Visibility toggle - inactive categories are hidden from public reads
    pub status: bool,
}

/// Category has no direct relations; the product link goes through the junction table
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        super::product_category::Relation::Product.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::product_category::Relation::Category.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
