//! Singleton WhatsApp settings endpoint: public read, lazily seeded.
//! There is no write path through the HTTP API; staff update the number
//! through the store's singleton upsert.

use crate::api::AppState;
use crate::api::schemas::WhatsAppOut;
use crate::core::settings::get_or_create_settings;
use crate::errors::Result;
use axum::Json;
use axum::extract::State;

/// `GET /api/whatsapp/` - returns the contact number, creating the row with
/// the default value on the first call.
pub async fn retrieve(State(state): State<AppState>) -> Result<Json<WhatsAppOut>> {
    let settings = get_or_create_settings(&state.db).await?;
    Ok(Json(WhatsAppOut::from(settings)))
}
