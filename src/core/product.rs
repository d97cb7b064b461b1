//! Product business logic.
//!
//! Product reads come back as [`ProductWithRelated`]: the row itself plus
//! its categories, images, reviews, and plans, fetched with SeaORM's batch
//! loaders so a whole page costs a fixed number of queries instead of one
//! per row. Writes that touch the category links or cascade to dependent
//! rows run inside a single transaction.

use crate::{
    core::{PAGE_SIZE, Role},
    entities::{
        Category, Product, ProductCategory, ProductImage, ProductPlan, Review, category, product,
        product_category, product_image, product_plan, review,
    },
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use sea_orm::{LoaderTrait, PaginatorTrait, QueryOrder, Set, TransactionTrait, prelude::*};

/// A product together with everything the wire format needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductWithRelated {
    /// The product row itself
    pub product: product::Model,
    /// Categories the product belongs to
    pub categories: Vec<category::Model>,
    /// Gallery images, ordered by their `ordering` column
    pub images: Vec<product_image::Model>,
    /// Customer reviews, newest first
    pub reviews: Vec<review::Model>,
    /// Pricing plans, shortest duration first
    pub plans: Vec<product_plan::Model>,
}

/// Fields for a new product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    /// Display title
    pub title: String,
    /// Rich-text description (opaque HTML)
    pub description: String,
    /// Rich-text notes (opaque HTML)
    pub notes: String,
    /// Optional base price
    pub price: Option<Decimal>,
    /// Visibility flag
    pub status: bool,
    /// Ids of categories to link
    pub category_ids: Vec<i64>,
}

/// Partial update to a product; `None` fields are left untouched.
/// `price` is doubly optional so a full update can clear it to NULL.
#[derive(Debug, Default, Clone)]
pub struct ProductChanges {
    /// New title
    pub title: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New notes
    pub notes: Option<String>,
    /// New price (`Some(None)` clears it)
    pub price: Option<Option<Decimal>>,
    /// New visibility flag
    pub status: Option<bool>,
    /// Replacement set of category links
    pub category_ids: Option<Vec<i64>>,
}

/// Lists products visible to the caller, one page at a time, with related
/// rows eager-loaded. Returns the page plus the total row count.
///
/// # Errors
/// Returns an error if any of the batched queries fail.
pub async fn list_products(
    db: &DatabaseConnection,
    role: Role,
    page: u64,
) -> Result<(Vec<ProductWithRelated>, u64)> {
    let mut query = Product::find().order_by_asc(product::Column::Id);
    if !role.sees_inactive() {
        query = query.filter(product::Column::Status.eq(true));
    }

    let paginator = query.paginate(db, PAGE_SIZE);
    let total = paginator.num_items().await?;
    let products = paginator.fetch_page(page).await?;

    Ok((load_related(db, products).await?, total))
}

/// Fetches one product with related rows, or None when it does not exist
/// or is invisible to the caller.
///
/// # Errors
/// Returns an error if any of the queries fail.
pub async fn get_product(
    db: &DatabaseConnection,
    id: i64,
    role: Role,
) -> Result<Option<ProductWithRelated>> {
    let mut query = Product::find_by_id(id);
    if !role.sees_inactive() {
        query = query.filter(product::Column::Status.eq(true));
    }

    match query.one(db).await? {
        Some(model) => Ok(load_related(db, vec![model]).await?.pop()),
        None => Ok(None),
    }
}

/// Creates a product and its category links in one transaction.
///
/// # Errors
/// Returns an error if:
/// - The title is empty or whitespace-only
/// - The price is negative
/// - Any category id does not exist
/// - The database insert fails
pub async fn create_product(db: &DatabaseConnection, new: NewProduct) -> Result<product::Model> {
    let title = new.title.trim().to_string();
    if title.is_empty() {
        return Err(Error::validation("title", "product title cannot be empty"));
    }
    if let Some(price) = new.price {
        ensure_non_negative_price(price)?;
    }

    let now = chrono::Utc::now().naive_utc();
    let txn = db.begin().await?;

    let product = product::ActiveModel {
        title: Set(title),
        description: Set(new.description),
        notes: Set(new.notes),
        price: Set(new.price),
        status: Set(new.status),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    link_categories(&txn, product.id, &new.category_ids).await?;

    txn.commit().await?;
    Ok(product)
}

/// Applies a partial update to a product; replacing the category set and
/// bumping `updated_at` happen in the same transaction as the row update.
///
/// # Errors
/// Returns an error if:
/// - The product does not exist
/// - A new title is empty, or a new price is negative
/// - A replacement category id does not exist
/// - The database update fails
pub async fn update_product(
    db: &DatabaseConnection,
    id: i64,
    changes: ProductChanges,
) -> Result<product::Model> {
    let mut product: product::ActiveModel = Product::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("product"))?
        .into();

    if let Some(title) = changes.title {
        let title = title.trim().to_string();
        if title.is_empty() {
            return Err(Error::validation("title", "product title cannot be empty"));
        }
        product.title = Set(title);
    }
    if let Some(description) = changes.description {
        product.description = Set(description);
    }
    if let Some(notes) = changes.notes {
        product.notes = Set(notes);
    }
    if let Some(price) = changes.price {
        if let Some(value) = price {
            ensure_non_negative_price(value)?;
        }
        product.price = Set(price);
    }
    if let Some(status) = changes.status {
        product.status = Set(status);
    }
    product.updated_at = Set(chrono::Utc::now().naive_utc());

    let txn = db.begin().await?;
    let updated = product.update(&txn).await?;

    if let Some(category_ids) = changes.category_ids {
        ProductCategory::delete_many()
            .filter(product_category::Column::ProductId.eq(id))
            .exec(&txn)
            .await?;
        link_categories(&txn, id, &category_ids).await?;
    }

    txn.commit().await?;
    Ok(updated)
}

/// Deletes a product and cascades to its images, plans, reviews, and
/// category links in one transaction.
///
/// # Errors
/// Returns an error if the product does not exist or the delete fails.
pub async fn delete_product(db: &DatabaseConnection, id: i64) -> Result<()> {
    let product = Product::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("product"))?;

    let txn = db.begin().await?;
    ProductImage::delete_many()
        .filter(product_image::Column::ProductId.eq(id))
        .exec(&txn)
        .await?;
    ProductPlan::delete_many()
        .filter(product_plan::Column::ProductId.eq(id))
        .exec(&txn)
        .await?;
    Review::delete_many()
        .filter(review::Column::ProductId.eq(id))
        .exec(&txn)
        .await?;
    ProductCategory::delete_many()
        .filter(product_category::Column::ProductId.eq(id))
        .exec(&txn)
        .await?;
    product.delete(&txn).await?;
    txn.commit().await?;

    Ok(())
}

/// Batch-loads related rows for a set of products in four queries.
async fn load_related(
    db: &DatabaseConnection,
    products: Vec<product::Model>,
) -> Result<Vec<ProductWithRelated>> {
    let images = products
        .load_many(
            ProductImage::find().order_by_asc(product_image::Column::Ordering),
            db,
        )
        .await?;
    let reviews = products
        .load_many(Review::find().order_by_desc(review::Column::CreatedAt), db)
        .await?;
    let plans = products
        .load_many(
            ProductPlan::find().order_by_asc(product_plan::Column::DurationMonths),
            db,
        )
        .await?;
    let categories = products
        .load_many_to_many(Category::find(), ProductCategory, db)
        .await?;

    Ok(products
        .into_iter()
        .zip(categories)
        .zip(images)
        .zip(reviews)
        .zip(plans)
        .map(
            |((((product, categories), images), reviews), plans)| ProductWithRelated {
                product,
                categories,
                images,
                reviews,
                plans,
            },
        )
        .collect())
}

async fn link_categories<C: ConnectionTrait>(
    conn: &C,
    product_id: i64,
    category_ids: &[i64],
) -> Result<()> {
    if category_ids.is_empty() {
        return Ok(());
    }

    let found = Category::find()
        .filter(category::Column::Id.is_in(category_ids.to_vec()))
        .all(conn)
        .await?;
    if found.len() != category_ids.len() {
        return Err(Error::validation(
            "categories",
            "one or more category ids do not exist",
        ));
    }

    for &category_id in category_ids {
        product_category::ActiveModel {
            product_id: Set(product_id),
            category_id: Set(category_id),
        }
        .insert(conn)
        .await?;
    }
    Ok(())
}

fn ensure_non_negative_price(price: Decimal) -> Result<()> {
    if price < Decimal::ZERO {
        return Err(Error::validation("price", "price cannot be negative"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::{category::create_category, image, plan, review as review_core};
    use crate::test_utils::{new_test_product, setup_test_db};

    #[tokio::test]
    async fn test_create_product_with_categories() -> Result<()> {
        let db = setup_test_db().await?;

        let cat = create_category(&db, "Streaming".to_string(), None, true).await?;
        let product = create_product(
            &db,
            NewProduct {
                category_ids: vec![cat.id],
                ..new_test_product("Netflix")
            },
        )
        .await?;

        let loaded = get_product(&db, product.id, Role::Public).await?.unwrap();
        assert_eq!(loaded.categories.len(), 1);
        assert_eq!(loaded.categories[0].slug, "streaming");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_rejects_unknown_category() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_product(
            &db,
            NewProduct {
                category_ids: vec![999],
                ..new_test_product("Netflix")
            },
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        // The transaction rolled back: no orphan product row
        let (products, total) = list_products(&db, Role::Staff, 0).await?;
        assert!(products.is_empty());
        assert_eq!(total, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_rejects_negative_price() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_product(
            &db,
            NewProduct {
                price: Some(Decimal::new(-100, 2)),
                ..new_test_product("Netflix")
            },
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_list_products_visibility() -> Result<()> {
        let db = setup_test_db().await?;

        create_product(&db, new_test_product("Visible")).await?;
        create_product(
            &db,
            NewProduct {
                status: false,
                ..new_test_product("Hidden")
            },
        )
        .await?;

        let (public, _) = list_products(&db, Role::Public, 0).await?;
        assert_eq!(public.len(), 1);
        assert_eq!(public[0].product.title, "Visible");

        let (staff, _) = list_products(&db, Role::Staff, 0).await?;
        assert_eq!(staff.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_list_products_eager_loads_related_rows() -> Result<()> {
        let db = setup_test_db().await?;

        let product = create_product(&db, new_test_product("Netflix")).await?;
        image::add_image(&db, product.id, Some("a.png".to_string()), false, 1).await?;
        image::add_image(&db, product.id, Some("b.png".to_string()), false, 0).await?;
        plan::create_plan(
            &db,
            product.id,
            "1 Year".to_string(),
            12,
            Decimal::new(9999, 2),
            true,
        )
        .await?;
        review_core::create_review(
            &db,
            product.id,
            "Asad".to_string(),
            5,
            "Great".to_string(),
            true,
        )
        .await?;

        let (products, _) = list_products(&db, Role::Public, 0).await?;
        let loaded = &products[0];
        assert_eq!(loaded.images.len(), 2);
        // Images come back in gallery order, not insertion order
        assert_eq!(loaded.images[0].image.as_deref(), Some("b.png"));
        assert_eq!(loaded.plans.len(), 1);
        assert_eq!(loaded.reviews.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_product_replaces_categories() -> Result<()> {
        let db = setup_test_db().await?;

        let first = create_category(&db, "First".to_string(), None, true).await?;
        let second = create_category(&db, "Second".to_string(), None, true).await?;
        let product = create_product(
            &db,
            NewProduct {
                category_ids: vec![first.id],
                ..new_test_product("Netflix")
            },
        )
        .await?;

        update_product(
            &db,
            product.id,
            ProductChanges {
                category_ids: Some(vec![second.id]),
                ..Default::default()
            },
        )
        .await?;

        let loaded = get_product(&db, product.id, Role::Public).await?.unwrap();
        assert_eq!(loaded.categories.len(), 1);
        assert_eq!(loaded.categories[0].id, second.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_product_can_clear_price() -> Result<()> {
        let db = setup_test_db().await?;

        let product = create_product(
            &db,
            NewProduct {
                price: Some(Decimal::new(999, 2)),
                ..new_test_product("Netflix")
            },
        )
        .await?;

        let updated = update_product(
            &db,
            product.id,
            ProductChanges {
                price: Some(None),
                ..Default::default()
            },
        )
        .await?;
        assert!(updated.price.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_product_cascades() -> Result<()> {
        let db = setup_test_db().await?;

        let cat = create_category(&db, "Streaming".to_string(), None, true).await?;
        let product = create_product(
            &db,
            NewProduct {
                category_ids: vec![cat.id],
                ..new_test_product("Netflix")
            },
        )
        .await?;
        image::add_image(&db, product.id, Some("a.png".to_string()), true, 0).await?;
        plan::create_plan(
            &db,
            product.id,
            "1 Year".to_string(),
            12,
            Decimal::new(9999, 2),
            true,
        )
        .await?;
        review_core::create_review(
            &db,
            product.id,
            "Asad".to_string(),
            5,
            "Great".to_string(),
            true,
        )
        .await?;

        delete_product(&db, product.id).await?;

        assert!(get_product(&db, product.id, Role::Staff).await?.is_none());
        assert!(
            ProductImage::find()
                .filter(product_image::Column::ProductId.eq(product.id))
                .all(&db)
                .await?
                .is_empty()
        );
        assert!(
            ProductPlan::find()
                .filter(product_plan::Column::ProductId.eq(product.id))
                .all(&db)
                .await?
                .is_empty()
        );
        assert!(
            Review::find()
                .filter(review::Column::ProductId.eq(product.id))
                .all(&db)
                .await?
                .is_empty()
        );
        assert!(
            ProductCategory::find()
                .filter(product_category::Column::ProductId.eq(product.id))
                .all(&db)
                .await?
                .is_empty()
        );

        // The category itself survives
        assert!(Category::find_by_id(cat.id).one(&db).await?.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_product_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = delete_product(&db, 999).await;
        assert!(matches!(result.unwrap_err(), Error::NotFound { .. }));

        Ok(())
    }
}
