//! Review business logic.
//!
//! Reviews are staff-curated: created and moderated through the
//! authenticated API, hidden (not deleted) via the active flag. The rating
//! must be a positive integer; listings come back newest-first.

use crate::{
    core::{PAGE_SIZE, Role},
    entities::{Product, Review, review},
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, QueryOrder, Set, prelude::*};

/// Partial update to a review; `None` fields are left untouched.
#[derive(Debug, Default, Clone)]
pub struct ReviewChanges {
    /// New reviewer name
    pub customer_name: Option<String>,
    /// New rating (must stay positive)
    pub rating: Option<i32>,
    /// New comment text
    pub comment: Option<String>,
    /// New visibility flag
    pub status: Option<bool>,
}

/// Lists reviews visible to the caller, newest first.
/// Returns the page plus the total row count.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_reviews(
    db: &DatabaseConnection,
    role: Role,
    page: u64,
) -> Result<(Vec<review::Model>, u64)> {
    let mut query = Review::find()
        .order_by_desc(review::Column::CreatedAt)
        .order_by_desc(review::Column::Id);
    if !role.sees_inactive() {
        query = query.filter(review::Column::Status.eq(true));
    }

    let paginator = query.paginate(db, PAGE_SIZE);
    let total = paginator.num_items().await?;
    let items = paginator.fetch_page(page).await?;
    Ok((items, total))
}

/// Fetches one review by id, or None when it does not exist or is invisible
/// to the caller.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_review(
    db: &DatabaseConnection,
    id: i64,
    role: Role,
) -> Result<Option<review::Model>> {
    let mut query = Review::find_by_id(id);
    if !role.sees_inactive() {
        query = query.filter(review::Column::Status.eq(true));
    }
    query.one(db).await.map_err(Into::into)
}

/// Creates a review on a product.
///
/// # Errors
/// Returns an error if:
/// - The product does not exist
/// - The customer name is empty or the rating is not positive
/// - The database insert fails
pub async fn create_review(
    db: &DatabaseConnection,
    product_id: i64,
    customer_name: String,
    rating: i32,
    comment: String,
    status: bool,
) -> Result<review::Model> {
    let customer_name = customer_name.trim().to_string();
    if customer_name.is_empty() {
        return Err(Error::validation(
            "customer_name",
            "customer name cannot be empty",
        ));
    }
    validate_rating(rating)?;

    Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("product"))?;

    let review = review::ActiveModel {
        product_id: Set(product_id),
        customer_name: Set(customer_name),
        rating: Set(rating),
        comment: Set(comment),
        status: Set(status),
        created_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    };
    review.insert(db).await.map_err(Into::into)
}

/// Applies a partial update to a review.
///
/// # Errors
/// Returns an error if the review does not exist, a new field fails
/// validation, or the database update fails.
pub async fn update_review(
    db: &DatabaseConnection,
    id: i64,
    changes: ReviewChanges,
) -> Result<review::Model> {
    let mut review: review::ActiveModel = Review::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("review"))?
        .into();

    if let Some(customer_name) = changes.customer_name {
        let customer_name = customer_name.trim().to_string();
        if customer_name.is_empty() {
            return Err(Error::validation(
                "customer_name",
                "customer name cannot be empty",
            ));
        }
        review.customer_name = Set(customer_name);
    }
    if let Some(rating) = changes.rating {
        validate_rating(rating)?;
        review.rating = Set(rating);
    }
    if let Some(comment) = changes.comment {
        review.comment = Set(comment);
    }
    if let Some(status) = changes.status {
        review.status = Set(status);
    }

    review.update(db).await.map_err(Into::into)
}

/// Removes a review.
///
/// # Errors
/// Returns an error if the review does not exist or the delete fails.
pub async fn delete_review(db: &DatabaseConnection, id: i64) -> Result<()> {
    let review = Review::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("review"))?;

    review.delete(db).await?;
    Ok(())
}

fn validate_rating(rating: i32) -> Result<()> {
    if rating < 1 {
        return Err(Error::validation(
            "rating",
            "rating must be a positive integer",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::product::create_product;
    use crate::test_utils::{new_test_product, setup_test_db};

    #[tokio::test]
    async fn test_create_review_rating_validation() -> Result<()> {
        let db = setup_test_db().await?;
        let product = create_product(&db, new_test_product("Netflix")).await?;

        for bad_rating in [0, -1, -5] {
            let result = create_review(
                &db,
                product.id,
                "Asad".to_string(),
                bad_rating,
                String::new(),
                true,
            )
            .await;
            assert!(matches!(result.unwrap_err(), Error::Validation { .. }));
        }

        let review =
            create_review(&db, product.id, "Asad".to_string(), 5, String::new(), true).await?;
        assert_eq!(review.rating, 5);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_review_unknown_product() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_review(&db, 999, "Asad".to_string(), 5, String::new(), true).await;
        assert!(matches!(result.unwrap_err(), Error::NotFound { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_list_reviews_newest_first() -> Result<()> {
        let db = setup_test_db().await?;
        let product = create_product(&db, new_test_product("Netflix")).await?;

        create_review(
            &db,
            product.id,
            "First".to_string(),
            4,
            String::new(),
            true,
        )
        .await?;
        create_review(
            &db,
            product.id,
            "Second".to_string(),
            5,
            String::new(),
            true,
        )
        .await?;

        let (reviews, _) = list_reviews(&db, Role::Public, 0).await?;
        assert_eq!(reviews[0].customer_name, "Second");
        assert_eq!(reviews[1].customer_name, "First");

        Ok(())
    }

    #[tokio::test]
    async fn test_list_reviews_visibility() -> Result<()> {
        let db = setup_test_db().await?;
        let product = create_product(&db, new_test_product("Netflix")).await?;

        create_review(
            &db,
            product.id,
            "Visible".to_string(),
            5,
            String::new(),
            true,
        )
        .await?;
        create_review(
            &db,
            product.id,
            "Hidden".to_string(),
            1,
            String::new(),
            false,
        )
        .await?;

        let (public, public_total) = list_reviews(&db, Role::Public, 0).await?;
        assert_eq!(public_total, 1);
        assert_eq!(public[0].customer_name, "Visible");

        let (_, staff_total) = list_reviews(&db, Role::Staff, 0).await?;
        assert_eq!(staff_total, 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_review_moderation() -> Result<()> {
        let db = setup_test_db().await?;
        let product = create_product(&db, new_test_product("Netflix")).await?;

        let review = create_review(
            &db,
            product.id,
            "Asad".to_string(),
            5,
            "ok".to_string(),
            true,
        )
        .await?;

        let hidden = update_review(
            &db,
            review.id,
            ReviewChanges {
                status: Some(false),
                ..Default::default()
            },
        )
        .await?;
        assert!(!hidden.status);

        let result = update_review(
            &db,
            review.id,
            ReviewChanges {
                rating: Some(0),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_review() -> Result<()> {
        let db = setup_test_db().await?;
        let product = create_product(&db, new_test_product("Netflix")).await?;

        let review =
            create_review(&db, product.id, "Asad".to_string(), 5, String::new(), true).await?;
        delete_review(&db, review.id).await?;

        assert!(get_review(&db, review.id, Role::Staff).await?.is_none());

        Ok(())
    }
}
