//! Junction table linking products and categories many-to-many.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product-category link row; the pair is the composite primary key
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product_categories")]
pub struct Model {
    /// Product side of the link
    #[sea_orm(primary_key, auto_increment = false)]
    pub product_id: i64,
    /// Category side of the link
    #[sea_orm(primary_key, auto_increment = false)]
    pub category_id: i64,
}

/// Both sides of the junction
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Link to the owning product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
    /// Link to the category
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
