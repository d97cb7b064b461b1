//! Category business logic.
//!
//! Categories are the storefront's navigation axis. The slug is derived
//! from the name when the caller does not supply one, and slug uniqueness
//! is checked here before any row is written so a duplicate surfaces as a
//! Conflict rather than a bare driver error.

use crate::{
    core::{PAGE_SIZE, Role},
    entities::{Category, ProductCategory, category, product_category},
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, QueryOrder, Set, TransactionTrait, prelude::*};

/// Partial update to a category; `None` fields are left untouched.
#[derive(Debug, Default, Clone)]
pub struct CategoryChanges {
    /// New name
    pub name: Option<String>,
    /// New slug (must stay unique)
    pub slug: Option<String>,
    /// New visibility flag
    pub status: Option<bool>,
}

/// Derives a URL-safe slug from a display name: lowercase, alphanumerics
/// kept, runs of everything else collapsed into single hyphens.
#[must_use]
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_separator = false;

    for c in value.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c);
        } else {
            pending_separator = true;
        }
    }

    slug
}

/// Lists categories visible to the caller, one page at a time.
/// Returns the page of rows plus the total row count for the filter.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_categories(
    db: &DatabaseConnection,
    role: Role,
    page: u64,
) -> Result<(Vec<category::Model>, u64)> {
    let mut query = Category::find().order_by_asc(category::Column::Id);
    if !role.sees_inactive() {
        query = query.filter(category::Column::Status.eq(true));
    }

    let paginator = query.paginate(db, PAGE_SIZE);
    let total = paginator.num_items().await?;
    let items = paginator.fetch_page(page).await?;
    Ok((items, total))
}

/// Fetches one category by id, or None when it does not exist or is
/// invisible to the caller.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_category(
    db: &DatabaseConnection,
    id: i64,
    role: Role,
) -> Result<Option<category::Model>> {
    let mut query = Category::find_by_id(id);
    if !role.sees_inactive() {
        query = query.filter(category::Column::Status.eq(true));
    }
    query.one(db).await.map_err(Into::into)
}

/// Creates a category, deriving the slug from the name when absent.
///
/// # Errors
/// Returns an error if:
/// - The name is empty or whitespace-only
/// - Neither the supplied slug nor the derived one contains any characters
/// - The slug is already taken (Conflict)
/// - The database insert fails
pub async fn create_category(
    db: &DatabaseConnection,
    name: String,
    slug: Option<String>,
    status: bool,
) -> Result<category::Model> {
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(Error::validation("name", "category name cannot be empty"));
    }

    let slug = match slug {
        Some(s) if !s.trim().is_empty() => s.trim().to_string(),
        _ => slugify(&name),
    };
    if slug.is_empty() {
        return Err(Error::validation(
            "slug",
            "slug cannot be derived from this name; supply one explicitly",
        ));
    }

    ensure_slug_free(db, &slug, None).await?;

    let category = category::ActiveModel {
        name: Set(name),
        slug: Set(slug),
        status: Set(status),
        ..Default::default()
    };
    category.insert(db).await.map_err(Into::into)
}

/// Applies a partial update to a category.
///
/// # Errors
/// Returns an error if:
/// - The category does not exist
/// - A new name is empty, or a new slug is empty or already taken
/// - The database update fails
pub async fn update_category(
    db: &DatabaseConnection,
    id: i64,
    changes: CategoryChanges,
) -> Result<category::Model> {
    let mut category: category::ActiveModel = Category::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("category"))?
        .into();

    if let Some(name) = changes.name {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(Error::validation("name", "category name cannot be empty"));
        }
        category.name = Set(name);
    }

    if let Some(slug) = changes.slug {
        let slug = slug.trim().to_string();
        if slug.is_empty() {
            return Err(Error::validation("slug", "slug cannot be empty"));
        }
        ensure_slug_free(db, &slug, Some(id)).await?;
        category.slug = Set(slug);
    }

    if let Some(status) = changes.status {
        category.status = Set(status);
    }

    category.update(db).await.map_err(Into::into)
}

/// Deletes a category and its product links in one transaction.
///
/// # Errors
/// Returns an error if the category does not exist or the delete fails.
pub async fn delete_category(db: &DatabaseConnection, id: i64) -> Result<()> {
    let category = Category::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("category"))?;

    let txn = db.begin().await?;
    ProductCategory::delete_many()
        .filter(product_category::Column::CategoryId.eq(id))
        .exec(&txn)
        .await?;
    category.delete(&txn).await?;
    txn.commit().await?;

    Ok(())
}

async fn ensure_slug_free(db: &DatabaseConnection, slug: &str, exclude: Option<i64>) -> Result<()> {
    let mut query = Category::find().filter(category::Column::Slug.eq(slug));
    if let Some(id) = exclude {
        query = query.filter(category::Column::Id.ne(id));
    }

    if query.one(db).await?.is_some() {
        return Err(Error::Conflict {
            message: format!("a category with slug '{slug}' already exists"),
        });
    }
    Ok(())
}
