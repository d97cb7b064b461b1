//! Category endpoints: public list/retrieve, staff-only writes.

use crate::api::AppState;
use crate::api::auth::{Caller, StaffUser};
use crate::api::schemas::{CategoryIn, CategoryOut, CategoryPatch, Page, PageQuery};
use crate::core::category::{
    self, CategoryChanges, create_category, delete_category, get_category, list_categories,
    update_category,
};
use crate::errors::{Error, Result};
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

/// `GET /api/categories/`
pub async fn list(
    State(state): State<AppState>,
    Caller(role): Caller,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<CategoryOut>>> {
    let page = query.page();
    let (items, count) = list_categories(&state.db, role, page - 1).await?;
    Ok(Json(Page::new(
        count,
        page,
        items.into_iter().map(CategoryOut::from).collect(),
    )))
}

/// `GET /api/categories/{id}/`
pub async fn retrieve(
    State(state): State<AppState>,
    Caller(role): Caller,
    Path(id): Path<i64>,
) -> Result<Json<CategoryOut>> {
    get_category(&state.db, id, role)
        .await?
        .map(|model| Json(CategoryOut::from(model)))
        .ok_or_else(|| Error::not_found("category"))
}

/// `POST /api/categories/`
pub async fn create(
    State(state): State<AppState>,
    _staff: StaffUser,
    Json(payload): Json<CategoryIn>,
) -> Result<(StatusCode, Json<CategoryOut>)> {
    let model = create_category(&state.db, payload.name, payload.slug, payload.status).await?;
    Ok((StatusCode::CREATED, Json(CategoryOut::from(model))))
}

/// `PUT /api/categories/{id}/`
pub async fn update_full(
    State(state): State<AppState>,
    _staff: StaffUser,
    Path(id): Path<i64>,
    Json(payload): Json<CategoryIn>,
) -> Result<Json<CategoryOut>> {
    let slug = payload
        .slug
        .unwrap_or_else(|| category::slugify(&payload.name));
    let changes = CategoryChanges {
        name: Some(payload.name),
        slug: Some(slug),
        status: Some(payload.status),
    };
    let model = update_category(&state.db, id, changes).await?;
    Ok(Json(CategoryOut::from(model)))
}

/// `PATCH /api/categories/{id}/`
pub async fn update_partial(
    State(state): State<AppState>,
    _staff: StaffUser,
    Path(id): Path<i64>,
    Json(payload): Json<CategoryPatch>,
) -> Result<Json<CategoryOut>> {
    let changes = CategoryChanges {
        name: payload.name,
        slug: payload.slug,
        status: payload.status,
    };
    let model = update_category(&state.db, id, changes).await?;
    Ok(Json(CategoryOut::from(model)))
}

/// `DELETE /api/categories/{id}/`
pub async fn destroy(
    State(state): State<AppState>,
    _staff: StaffUser,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    delete_category(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
