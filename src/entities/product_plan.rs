//! ProductPlan entity - A purchasable duration/price option for a product.
//!
//! `duration_months = 0` means a lifetime plan. The (product, duration)
//! pair is unique; `core::plan` enforces that at write time. Plans default
//! to ascending duration order.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product plan database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product_plans")]
pub struct Model {
    /// Unique identifier for the plan
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the product this plan belongs to
    pub product_id: i64,
    /// Display title (e.g., "1 Year", "Lifetime")
    pub title: String,
    /// Plan length in months; 0 means lifetime
    pub duration_months: i32,
    /// Plan price
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,
    /// Visibility toggle - inactive plans are hidden from public reads
    pub is_active: bool,
    /// When the plan was created
    pub created_at: DateTime,
}

/// Defines relationships between ProductPlan and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each plan belongs to one product
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
