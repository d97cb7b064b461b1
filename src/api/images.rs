//! Product image endpoints. Listing follows the owning product's
//! visibility; all writes are staff-only. The set-main route is the
//! explicit flag swap - it clears the previous main image in the same
//! transaction (see `core::image`).

use crate::api::AppState;
use crate::api::auth::{Caller, StaffUser};
use crate::api::schemas::{ImageIn, ImageOut, ImagePatch};
use crate::core::image::{
    ImageChanges, add_image, delete_image, list_images, set_main_image, update_image,
};
use crate::core::product::get_product;
use crate::errors::{Error, Result};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

/// `GET /api/products/{id}/images/`
pub async fn list(
    State(state): State<AppState>,
    Caller(role): Caller,
    Path(product_id): Path<i64>,
) -> Result<Json<Vec<ImageOut>>> {
    // The gallery of an inactive product is invisible to the public too
    get_product(&state.db, product_id, role)
        .await?
        .ok_or_else(|| Error::not_found("product"))?;

    let images = list_images(&state.db, product_id).await?;
    Ok(Json(
        images
            .into_iter()
            .map(|image| ImageOut::from_model(image, &state.config))
            .collect(),
    ))
}

/// `POST /api/products/{id}/images/`
pub async fn create(
    State(state): State<AppState>,
    _staff: StaffUser,
    Path(product_id): Path<i64>,
    Json(payload): Json<ImageIn>,
) -> Result<(StatusCode, Json<ImageOut>)> {
    let model = add_image(
        &state.db,
        product_id,
        payload.image,
        payload.is_main,
        payload.ordering,
    )
    .await?;
    Ok((
        StatusCode::CREATED,
        Json(ImageOut::from_model(model, &state.config)),
    ))
}

/// `POST /api/products/{id}/images/{image_id}/set-main/`
pub async fn set_main(
    State(state): State<AppState>,
    _staff: StaffUser,
    Path((product_id, image_id)): Path<(i64, i64)>,
) -> Result<Json<ImageOut>> {
    let model = set_main_image(&state.db, product_id, image_id).await?;
    Ok(Json(ImageOut::from_model(model, &state.config)))
}

/// `PATCH /api/images/{id}/`
pub async fn update_partial(
    State(state): State<AppState>,
    _staff: StaffUser,
    Path(id): Path<i64>,
    Json(payload): Json<ImagePatch>,
) -> Result<Json<ImageOut>> {
    let changes = ImageChanges {
        image: payload.image,
        is_main: payload.is_main,
        ordering: payload.ordering,
    };
    let model = update_image(&state.db, id, changes).await?;
    Ok(Json(ImageOut::from_model(model, &state.config)))
}

/// `DELETE /api/images/{id}/`
pub async fn destroy(
    State(state): State<AppState>,
    _staff: StaffUser,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    delete_image(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
