//! Pricing plan endpoints: public list/retrieve, staff-only writes.

use crate::api::AppState;
use crate::api::auth::{Caller, StaffUser};
use crate::api::schemas::{Page, PageQuery, PlanIn, PlanOut, PlanPatch};
use crate::core::plan::{
    PlanChanges, create_plan, delete_plan, get_plan, list_plans, update_plan,
};
use crate::errors::{Error, Result};
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

/// `GET /api/plans/`
pub async fn list(
    State(state): State<AppState>,
    Caller(role): Caller,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<PlanOut>>> {
    let page = query.page();
    let (items, count) = list_plans(&state.db, role, page - 1).await?;
    let results = items
        .into_iter()
        .map(|(plan, _product)| PlanOut::from(plan))
        .collect();
    Ok(Json(Page::new(count, page, results)))
}

/// `GET /api/plans/{id}/`
pub async fn retrieve(
    State(state): State<AppState>,
    Caller(role): Caller,
    Path(id): Path<i64>,
) -> Result<Json<PlanOut>> {
    get_plan(&state.db, id, role)
        .await?
        .map(|model| Json(PlanOut::from(model)))
        .ok_or_else(|| Error::not_found("plan"))
}

/// `POST /api/plans/`
pub async fn create(
    State(state): State<AppState>,
    _staff: StaffUser,
    Json(payload): Json<PlanIn>,
) -> Result<(StatusCode, Json<PlanOut>)> {
    let model = create_plan(
        &state.db,
        payload.product,
        payload.title,
        payload.duration_months,
        payload.price,
        payload.is_active,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(PlanOut::from(model))))
}

/// `PUT /api/plans/{id}/`
pub async fn update_full(
    State(state): State<AppState>,
    _staff: StaffUser,
    Path(id): Path<i64>,
    Json(payload): Json<PlanIn>,
) -> Result<Json<PlanOut>> {
    let changes = PlanChanges {
        title: Some(payload.title),
        duration_months: Some(payload.duration_months),
        price: Some(payload.price),
        is_active: Some(payload.is_active),
    };
    let model = update_plan(&state.db, id, changes).await?;
    Ok(Json(PlanOut::from(model)))
}

/// `PATCH /api/plans/{id}/`
pub async fn update_partial(
    State(state): State<AppState>,
    _staff: StaffUser,
    Path(id): Path<i64>,
    Json(payload): Json<PlanPatch>,
) -> Result<Json<PlanOut>> {
    let changes = PlanChanges {
        title: payload.title,
        duration_months: payload.duration_months,
        price: payload.price,
        is_active: payload.is_active,
    };
    let model = update_plan(&state.db, id, changes).await?;
    Ok(Json(PlanOut::from(model)))
}

/// `DELETE /api/plans/{id}/`
pub async fn destroy(
    State(state): State<AppState>,
    _staff: StaffUser,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    delete_plan(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
