//! Singleton WhatsApp settings logic.
//!
//! The settings table holds exactly one row. Instead of trusting callers to
//! pass the right key, every write goes through [`upsert_singleton`], which
//! always targets [`SINGLETON_ID`] inside a transaction - creating the row
//! if absent, updating it otherwise. Reads go through
//! [`get_or_create_settings`], which lazily seeds the default number on the
//! first call.

use crate::{
    entities::{WhatsAppSettings, whatsapp_settings, whatsapp_settings::SINGLETON_ID},
    errors::{Error, Result},
};
use sea_orm::{Set, TransactionTrait, prelude::*};

/// Number returned before staff have configured anything.
pub const DEFAULT_WHATSAPP_NUMBER: &str = "+923001234567";

/// Validates the `+92XXXXXXXXXX` contact number format: the `+92` country
/// code followed by exactly ten digits.
///
/// # Errors
/// Returns a validation error describing the expected format.
pub fn validate_whatsapp_number(number: &str) -> Result<()> {
    let valid = number
        .strip_prefix("+92")
        .is_some_and(|rest| rest.len() == 10 && rest.bytes().all(|b| b.is_ascii_digit()));

    if valid {
        Ok(())
    } else {
        Err(Error::validation(
            "whatsapp_number",
            "WhatsApp number must be in format: +92XXXXXXXXXX",
        ))
    }
}

/// Returns the singleton settings row, creating it with the default number
/// on first read.
///
/// # Errors
/// Returns an error if the database read or lazy insert fails.
pub async fn get_or_create_settings(db: &DatabaseConnection) -> Result<whatsapp_settings::Model> {
    if let Some(existing) = WhatsAppSettings::find_by_id(SINGLETON_ID).one(db).await? {
        return Ok(existing);
    }

    let txn = db.begin().await?;
    let created = whatsapp_settings::ActiveModel {
        id: Set(SINGLETON_ID),
        whatsapp_number: Set(DEFAULT_WHATSAPP_NUMBER.to_string()),
        updated_at: Set(chrono::Utc::now().naive_utc()),
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    Ok(created)
}

/// Writes the contact number to the well-known singleton row, regardless of
/// how many rows callers think exist. Insert-or-update runs in one
/// transaction so concurrent writes cannot produce a second row.
///
/// # Errors
/// Returns an error if the number fails validation or the write fails.
pub async fn upsert_singleton(
    db: &DatabaseConnection,
    whatsapp_number: String,
) -> Result<whatsapp_settings::Model> {
    validate_whatsapp_number(&whatsapp_number)?;

    let now = chrono::Utc::now().naive_utc();
    let txn = db.begin().await?;

    let model = match WhatsAppSettings::find_by_id(SINGLETON_ID).one(&txn).await? {
        Some(existing) => {
            let mut settings: whatsapp_settings::ActiveModel = existing.into();
            settings.whatsapp_number = Set(whatsapp_number);
            settings.updated_at = Set(now);
            settings.update(&txn).await?
        }
        None => {
            whatsapp_settings::ActiveModel {
                id: Set(SINGLETON_ID),
                whatsapp_number: Set(whatsapp_number),
                updated_at: Set(now),
            }
            .insert(&txn)
            .await?
        }
    };

    txn.commit().await?;
    Ok(model)
}
