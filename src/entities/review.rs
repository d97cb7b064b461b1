//! Review entity - A customer review attached to a product.
//!
//! Reviews are staff-curated content: they are created and moderated through
//! the authenticated API, and the active flag hides rather than deletes.
//! Default ordering is newest-first.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Review database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    /// Unique identifier for the review
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the product being reviewed
    pub product_id: i64,
    /// Display name of the reviewer
    pub customer_name: String,
    /// Star rating; must be a positive integer
    pub rating: i32,
    /// Free-form review text (may be empty)
    #[sea_orm(column_type = "Text")]
    pub comment: String,
    /// Visibility toggle - inactive reviews are hidden from public reads
    pub status: bool,
    /// When the review was created
    pub created_at: DateTime,
}

/// Defines relationships between Review and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each review belongs to one product
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
