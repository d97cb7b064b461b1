//! Product image business logic.
//!
//! The invariant here is that at most one image per product carries
//! `is_main = true`. Every write path that can set the flag clears it on
//! the product's other images inside the same transaction, so a concurrent
//! reader never observes two main images. [`set_main_image`] is the
//! explicit flag-swap operation; [`add_image`] and [`update_image`] apply
//! the same rule when a write arrives with the flag already set.

use crate::{
    entities::{Product, ProductImage, product_image},
    errors::{Error, Result},
};
use sea_orm::sea_query::Expr;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};

/// Partial update to an image; `None` fields are left untouched.
#[derive(Debug, Default, Clone)]
pub struct ImageChanges {
    /// New storage reference
    pub image: Option<String>,
    /// New main flag (`Some(true)` clears the flag on siblings)
    pub is_main: Option<bool>,
    /// New gallery position
    pub ordering: Option<i32>,
}

/// Lists a product's images in gallery order.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_images(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<Vec<product_image::Model>> {
    ProductImage::find()
        .filter(product_image::Column::ProductId.eq(product_id))
        .order_by_asc(product_image::Column::Ordering)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Attaches an image to a product. When `is_main` is set, the main flag is
/// cleared on the product's other images in the same transaction.
///
/// # Errors
/// Returns an error if:
/// - The product does not exist
/// - The ordering is negative
/// - The database insert fails
pub async fn add_image(
    db: &DatabaseConnection,
    product_id: i64,
    image: Option<String>,
    is_main: bool,
    ordering: i32,
) -> Result<product_image::Model> {
    ensure_non_negative_ordering(ordering)?;
    Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("product"))?;

    let txn = db.begin().await?;

    if is_main {
        clear_main_flags(&txn, product_id, None).await?;
    }

    let inserted = product_image::ActiveModel {
        product_id: Set(product_id),
        image: Set(image),
        is_main: Set(is_main),
        ordering: Set(ordering),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;
    Ok(inserted)
}

/// Applies a partial update to an image. Setting `is_main` clears the flag
/// on the product's other images in the same transaction.
///
/// # Errors
/// Returns an error if:
/// - The image does not exist
/// - A new ordering is negative
/// - The database update fails
pub async fn update_image(
    db: &DatabaseConnection,
    image_id: i64,
    changes: ImageChanges,
) -> Result<product_image::Model> {
    let existing = ProductImage::find_by_id(image_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("image"))?;
    let product_id = existing.product_id;

    if let Some(ordering) = changes.ordering {
        ensure_non_negative_ordering(ordering)?;
    }

    let txn = db.begin().await?;

    if changes.is_main == Some(true) {
        clear_main_flags(&txn, product_id, Some(image_id)).await?;
    }

    let mut image: product_image::ActiveModel = existing.into();
    if let Some(reference) = changes.image {
        image.image = Set(Some(reference));
    }
    if let Some(is_main) = changes.is_main {
        image.is_main = Set(is_main);
    }
    if let Some(ordering) = changes.ordering {
        image.ordering = Set(ordering);
    }

    let updated = image.update(&txn).await?;
    txn.commit().await?;
    Ok(updated)
}

/// Makes the given image the product's main image, clearing the flag on its
/// siblings, all within one transaction.
///
/// # Errors
/// Returns an error if the image does not exist under that product, or the
/// database update fails.
pub async fn set_main_image(
    db: &DatabaseConnection,
    product_id: i64,
    image_id: i64,
) -> Result<product_image::Model> {
    let image = ProductImage::find_by_id(image_id)
        .filter(product_image::Column::ProductId.eq(product_id))
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("image"))?;

    let txn = db.begin().await?;

    clear_main_flags(&txn, product_id, Some(image_id)).await?;

    let mut active: product_image::ActiveModel = image.into();
    active.is_main = Set(true);
    let updated = active.update(&txn).await?;

    txn.commit().await?;
    Ok(updated)
}

/// Removes an image row.
///
/// # Errors
/// Returns an error if the image does not exist or the delete fails.
pub async fn delete_image(db: &DatabaseConnection, image_id: i64) -> Result<()> {
    let image = ProductImage::find_by_id(image_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("image"))?;

    image.delete(db).await?;
    Ok(())
}

/// Clears `is_main` on all of a product's images, optionally sparing one.
async fn clear_main_flags<C: ConnectionTrait>(
    conn: &C,
    product_id: i64,
    keep: Option<i64>,
) -> Result<()> {
    let mut update = ProductImage::update_many()
        .col_expr(product_image::Column::IsMain, Expr::value(false))
        .filter(product_image::Column::ProductId.eq(product_id));
    if let Some(id) = keep {
        update = update.filter(product_image::Column::Id.ne(id));
    }
    update.exec(conn).await?;
    Ok(())
}

fn ensure_non_negative_ordering(ordering: i32) -> Result<()> {
    if ordering < 0 {
        return Err(Error::validation("ordering", "ordering cannot be negative"));
    }
    Ok(())
}
