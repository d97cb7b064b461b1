//! Product endpoints: public list/retrieve with nested related rows,
//! staff-only writes. Write responses re-read the product so the client
//! always gets the same nested shape reads produce.

use crate::api::AppState;
use crate::api::auth::{Caller, StaffUser};
use crate::api::schemas::{Page, PageQuery, ProductIn, ProductOut, ProductPatch};
use crate::core::Role;
use crate::core::product::{
    NewProduct, ProductChanges, create_product, delete_product, get_product, list_products,
    update_product,
};
use crate::errors::{Error, Result};
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

/// `GET /api/products/`
pub async fn list(
    State(state): State<AppState>,
    Caller(role): Caller,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<ProductOut>>> {
    let page = query.page();
    let (items, count) = list_products(&state.db, role, page - 1).await?;
    let results = items
        .into_iter()
        .map(|loaded| ProductOut::from_related(loaded, &state.config))
        .collect();
    Ok(Json(Page::new(count, page, results)))
}

/// `GET /api/products/{id}/`
pub async fn retrieve(
    State(state): State<AppState>,
    Caller(role): Caller,
    Path(id): Path<i64>,
) -> Result<Json<ProductOut>> {
    get_product(&state.db, id, role)
        .await?
        .map(|loaded| Json(ProductOut::from_related(loaded, &state.config)))
        .ok_or_else(|| Error::not_found("product"))
}

/// `POST /api/products/`
pub async fn create(
    State(state): State<AppState>,
    _staff: StaffUser,
    Json(payload): Json<ProductIn>,
) -> Result<(StatusCode, Json<ProductOut>)> {
    let model = create_product(
        &state.db,
        NewProduct {
            title: payload.title,
            description: payload.description,
            notes: payload.notes,
            price: payload.price,
            status: payload.status,
            category_ids: payload.categories,
        },
    )
    .await?;

    let loaded = reload(&state, model.id).await?;
    Ok((
        StatusCode::CREATED,
        Json(ProductOut::from_related(loaded, &state.config)),
    ))
}

/// `PUT /api/products/{id}/`
pub async fn update_full(
    State(state): State<AppState>,
    _staff: StaffUser,
    Path(id): Path<i64>,
    Json(payload): Json<ProductIn>,
) -> Result<Json<ProductOut>> {
    let changes = ProductChanges {
        title: Some(payload.title),
        description: Some(payload.description),
        notes: Some(payload.notes),
        price: Some(payload.price),
        status: Some(payload.status),
        category_ids: Some(payload.categories),
    };
    update_product(&state.db, id, changes).await?;

    let loaded = reload(&state, id).await?;
    Ok(Json(ProductOut::from_related(loaded, &state.config)))
}

/// `PATCH /api/products/{id}/`
pub async fn update_partial(
    State(state): State<AppState>,
    _staff: StaffUser,
    Path(id): Path<i64>,
    Json(payload): Json<ProductPatch>,
) -> Result<Json<ProductOut>> {
    let changes = ProductChanges {
        title: payload.title,
        description: payload.description,
        notes: payload.notes,
        price: payload.price.map(Some),
        status: payload.status,
        category_ids: payload.categories,
    };
    update_product(&state.db, id, changes).await?;

    let loaded = reload(&state, id).await?;
    Ok(Json(ProductOut::from_related(loaded, &state.config)))
}

/// `DELETE /api/products/{id}/`
pub async fn destroy(
    State(state): State<AppState>,
    _staff: StaffUser,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    delete_product(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn reload(state: &AppState, id: i64) -> Result<crate::core::product::ProductWithRelated> {
    get_product(&state.db, id, Role::Staff)
        .await?
        .ok_or_else(|| Error::not_found("product"))
}
