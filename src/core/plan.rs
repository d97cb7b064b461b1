//! Pricing plan business logic.
//!
//! A plan is a (duration, price) option on a product; `duration_months = 0`
//! means lifetime. Each product can carry at most one plan per duration,
//! checked here at write time so the violation surfaces as a Conflict.
//! Plan listings join the owning product in the same round trip.

use crate::{
    core::{PAGE_SIZE, Role},
    entities::{Product, ProductPlan, product, product_plan},
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use sea_orm::{PaginatorTrait, QueryOrder, Set, prelude::*};

/// Partial update to a plan; `None` fields are left untouched.
#[derive(Debug, Default, Clone)]
pub struct PlanChanges {
    /// New title
    pub title: Option<String>,
    /// New duration in months (uniqueness re-checked)
    pub duration_months: Option<i32>,
    /// New price
    pub price: Option<Decimal>,
    /// New visibility flag
    pub is_active: Option<bool>,
}

/// Lists plans visible to the caller with the owning product joined in,
/// shortest duration first. Returns the page plus the total row count.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_plans(
    db: &DatabaseConnection,
    role: Role,
    page: u64,
) -> Result<(Vec<(product_plan::Model, Option<product::Model>)>, u64)> {
    let mut query = ProductPlan::find()
        .find_also_related(Product)
        .order_by_asc(product_plan::Column::DurationMonths)
        .order_by_asc(product_plan::Column::Id);
    if !role.sees_inactive() {
        query = query.filter(product_plan::Column::IsActive.eq(true));
    }

    let paginator = query.paginate(db, PAGE_SIZE);
    let total = paginator.num_items().await?;
    let items = paginator.fetch_page(page).await?;
    Ok((items, total))
}

/// Fetches one plan by id, or None when it does not exist or is invisible
/// to the caller.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_plan(
    db: &DatabaseConnection,
    id: i64,
    role: Role,
) -> Result<Option<product_plan::Model>> {
    let mut query = ProductPlan::find_by_id(id);
    if !role.sees_inactive() {
        query = query.filter(product_plan::Column::IsActive.eq(true));
    }
    query.one(db).await.map_err(Into::into)
}

/// Creates a plan for a product.
///
/// # Errors
/// Returns an error if:
/// - The product does not exist
/// - The title is empty, the duration is negative, or the price is negative
/// - The product already has a plan with that duration (Conflict)
/// - The database insert fails
pub async fn create_plan(
    db: &DatabaseConnection,
    product_id: i64,
    title: String,
    duration_months: i32,
    price: Decimal,
    is_active: bool,
) -> Result<product_plan::Model> {
    let title = title.trim().to_string();
    if title.is_empty() {
        return Err(Error::validation("title", "plan title cannot be empty"));
    }
    validate_duration(duration_months)?;
    validate_price(price)?;

    Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("product"))?;

    ensure_duration_free(db, product_id, duration_months, None).await?;

    let plan = product_plan::ActiveModel {
        product_id: Set(product_id),
        title: Set(title),
        duration_months: Set(duration_months),
        price: Set(price),
        is_active: Set(is_active),
        created_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    };
    plan.insert(db).await.map_err(Into::into)
}

/// Applies a partial update to a plan, re-checking the duration pair
/// uniqueness when the duration changes.
///
/// # Errors
/// Returns an error if:
/// - The plan does not exist
/// - A new title/duration/price fails validation
/// - The new duration collides with a sibling plan (Conflict)
/// - The database update fails
pub async fn update_plan(
    db: &DatabaseConnection,
    id: i64,
    changes: PlanChanges,
) -> Result<product_plan::Model> {
    let existing = ProductPlan::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("plan"))?;
    let product_id = existing.product_id;
    let mut plan: product_plan::ActiveModel = existing.into();

    if let Some(title) = changes.title {
        let title = title.trim().to_string();
        if title.is_empty() {
            return Err(Error::validation("title", "plan title cannot be empty"));
        }
        plan.title = Set(title);
    }
    if let Some(duration) = changes.duration_months {
        validate_duration(duration)?;
        ensure_duration_free(db, product_id, duration, Some(id)).await?;
        plan.duration_months = Set(duration);
    }
    if let Some(price) = changes.price {
        validate_price(price)?;
        plan.price = Set(price);
    }
    if let Some(is_active) = changes.is_active {
        plan.is_active = Set(is_active);
    }

    plan.update(db).await.map_err(Into::into)
}

/// Removes a plan.
///
/// # Errors
/// Returns an error if the plan does not exist or the delete fails.
pub async fn delete_plan(db: &DatabaseConnection, id: i64) -> Result<()> {
    let plan = ProductPlan::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("plan"))?;

    plan.delete(db).await?;
    Ok(())
}

async fn ensure_duration_free(
    db: &DatabaseConnection,
    product_id: i64,
    duration_months: i32,
    exclude: Option<i64>,
) -> Result<()> {
    let mut query = ProductPlan::find()
        .filter(product_plan::Column::ProductId.eq(product_id))
        .filter(product_plan::Column::DurationMonths.eq(duration_months));
    if let Some(id) = exclude {
        query = query.filter(product_plan::Column::Id.ne(id));
    }

    if query.one(db).await?.is_some() {
        return Err(Error::Conflict {
            message: format!("this product already has a {duration_months}-month plan"),
        });
    }
    Ok(())
}

fn validate_duration(duration_months: i32) -> Result<()> {
    if duration_months < 0 {
        return Err(Error::validation(
            "duration_months",
            "duration cannot be negative (use 0 for lifetime)",
        ));
    }
    Ok(())
}

fn validate_price(price: Decimal) -> Result<()> {
    if price < Decimal::ZERO {
        return Err(Error::validation("price", "price cannot be negative"));
    }
    Ok(())
}
