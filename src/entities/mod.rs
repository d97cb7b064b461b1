//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod category;
pub mod product;
pub mod product_category;
pub mod product_image;
pub mod product_plan;
pub mod review;
pub mod whatsapp_settings;

// Re-export specific types to avoid conflicts
pub use category::{Column as CategoryColumn, Entity as Category, Model as CategoryModel};
pub use product::{Column as ProductColumn, Entity as Product, Model as ProductModel};
pub use product_category::{
    Column as ProductCategoryColumn, Entity as ProductCategory, Model as ProductCategoryModel,
};
pub use product_image::{
    Column as ProductImageColumn, Entity as ProductImage, Model as ProductImageModel,
};
pub use product_plan::{
    Column as ProductPlanColumn, Entity as ProductPlan, Model as ProductPlanModel,
};
pub use review::{Column as ReviewColumn, Entity as Review, Model as ReviewModel};
pub use whatsapp_settings::{
    Column as WhatsAppSettingsColumn, Entity as WhatsAppSettings, Model as WhatsAppSettingsModel,
};
