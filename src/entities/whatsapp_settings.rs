//! WhatsAppSettings entity - The singleton contact-settings row.
//!
//! The table is meant to hold exactly one row. `core::settings` enforces
//! that by always writing to the fixed id [`SINGLETON_ID`], so any number
//! of writes collapse onto the same row.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// The one id every settings write targets
pub const SINGLETON_ID: i32 = 1;

/// WhatsApp settings database model - a single-row table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "whatsapp_settings")]
pub struct Model {
    /// Fixed identifier; always [`SINGLETON_ID`]
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    /// Contact number in `+92XXXXXXXXXX` format
    pub whatsapp_number: String,
    /// When the settings were last modified
    pub updated_at: DateTime,
}

/// `WhatsAppSettings` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
