//! Review endpoints: public list/retrieve, staff-only writes (reviews are
//! curated content, not open submissions).

use crate::api::AppState;
use crate::api::auth::{Caller, StaffUser};
use crate::api::schemas::{Page, PageQuery, ReviewIn, ReviewOut, ReviewPatch};
use crate::core::review::{
    ReviewChanges, create_review, delete_review, get_review, list_reviews, update_review,
};
use crate::errors::{Error, Result};
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

/// `GET /api/reviews/`
pub async fn list(
    State(state): State<AppState>,
    Caller(role): Caller,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<ReviewOut>>> {
    let page = query.page();
    let (items, count) = list_reviews(&state.db, role, page - 1).await?;
    Ok(Json(Page::new(
        count,
        page,
        items.into_iter().map(ReviewOut::from).collect(),
    )))
}

/// `GET /api/reviews/{id}/`
pub async fn retrieve(
    State(state): State<AppState>,
    Caller(role): Caller,
    Path(id): Path<i64>,
) -> Result<Json<ReviewOut>> {
    get_review(&state.db, id, role)
        .await?
        .map(|model| Json(ReviewOut::from(model)))
        .ok_or_else(|| Error::not_found("review"))
}

/// `POST /api/reviews/`
pub async fn create(
    State(state): State<AppState>,
    _staff: StaffUser,
    Json(payload): Json<ReviewIn>,
) -> Result<(StatusCode, Json<ReviewOut>)> {
    let model = create_review(
        &state.db,
        payload.product,
        payload.customer_name,
        payload.rating,
        payload.comment,
        payload.status,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(ReviewOut::from(model))))
}

/// `PUT /api/reviews/{id}/`
pub async fn update_full(
    State(state): State<AppState>,
    _staff: StaffUser,
    Path(id): Path<i64>,
    Json(payload): Json<ReviewIn>,
) -> Result<Json<ReviewOut>> {
    let changes = ReviewChanges {
        customer_name: Some(payload.customer_name),
        rating: Some(payload.rating),
        comment: Some(payload.comment),
        status: Some(payload.status),
    };
    let model = update_review(&state.db, id, changes).await?;
    Ok(Json(ReviewOut::from(model)))
}

/// `PATCH /api/reviews/{id}/`
pub async fn update_partial(
    State(state): State<AppState>,
    _staff: StaffUser,
    Path(id): Path<i64>,
    Json(payload): Json<ReviewPatch>,
) -> Result<Json<ReviewOut>> {
    let changes = ReviewChanges {
        customer_name: payload.customer_name,
        rating: payload.rating,
        comment: payload.comment,
        status: payload.status,
    };
    let model = update_review(&state.db, id, changes).await?;
    Ok(Json(ReviewOut::from(model)))
}

/// `DELETE /api/reviews/{id}/`
pub async fn destroy(
    State(state): State<AppState>,
    _staff: StaffUser,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    delete_review(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
