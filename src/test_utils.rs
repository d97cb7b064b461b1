//! Shared test utilities for `catalog-api`.
//!
//! This module provides common helper functions for setting up test
//! databases and application state against an in-memory `SQLite` database.

use crate::api::AppState;
use crate::config::AppConfig;
use crate::core::product::NewProduct;
use crate::errors::Result;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Configuration with fixed test values (no environment access).
#[must_use]
pub fn test_config() -> AppConfig {
    AppConfig {
        bind_addr: "127.0.0.1:0".to_string(),
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: "test-secret".to_string(),
        media_base_url: "https://media.test/uploads".to_string(),
        admin_username: "admin".to_string(),
        admin_password: "correct-horse".to_string(),
    }
}

/// Creates full application state over a fresh in-memory database.
pub async fn setup_test_state() -> Result<AppState> {
    Ok(AppState::new(setup_test_db().await?, Arc::new(test_config())))
}

/// A minimal valid product payload with sensible defaults.
///
/// # Defaults
/// * `description`: a short HTML snippet
/// * `notes`: empty
/// * `price`: None
/// * `status`: active
/// * `category_ids`: none
#[must_use]
pub fn new_test_product(title: &str) -> NewProduct {
    NewProduct {
        title: title.to_string(),
        description: "<p>Test product</p>".to_string(),
        notes: String::new(),
        price: None,
        status: true,
        category_ids: Vec::new(),
    }
}
