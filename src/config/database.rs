//! Database connection and schema setup.
//!
//! The schema is generated straight from the entity definitions with
//! SeaORM's `Schema::create_table_from_entity`, so the tables always match
//! the Rust structs without hand-written SQL. Table creation is idempotent
//! (`IF NOT EXISTS`) so the server can restart against an existing file.

use crate::entities::{
    Category, Product, ProductCategory, ProductImage, ProductPlan, Review, WhatsAppSettings,
};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Establishes a connection to the database at the given URL.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates all catalog tables from the entity definitions.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut statements = vec![
        schema.create_table_from_entity(Category),
        schema.create_table_from_entity(Product),
        schema.create_table_from_entity(ProductCategory),
        schema.create_table_from_entity(ProductImage),
        schema.create_table_from_entity(ProductPlan),
        schema.create_table_from_entity(Review),
        schema.create_table_from_entity(WhatsAppSettings),
    ];

    for statement in &mut statements {
        statement.if_not_exists();
        db.execute(builder.build(&*statement)).await?;
    }

    Ok(())
}
