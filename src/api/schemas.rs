//! Wire-format schemas: what goes out as JSON and what comes in.
//!
//! Out types mirror the public API shape, including the computed
//! `main_image` field and image URL resolution against the configured media
//! base. In types only pin down shape and defaults; value constraints
//! (ratings, prices, phone format) live in `core` so nothing invalid ever
//! reaches storage regardless of the entry point.

use crate::config::AppConfig;
use crate::core::PAGE_SIZE;
use crate::core::product::ProductWithRelated;
use crate::entities::{category, product_image, product_plan, review, whatsapp_settings};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Pagination query string: `?page=N`, 1-based.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    /// Requested page number; anything below 1 is clamped to 1
    pub page: Option<u64>,
}

impl PageQuery {
    /// The effective 1-based page number.
    #[must_use]
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }
}

/// Envelope around every list response.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    /// Total rows matching the filter, across all pages
    pub count: u64,
    /// Next page number, if any
    pub next: Option<u64>,
    /// Previous page number, if any
    pub previous: Option<u64>,
    /// This page's rows
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Wraps one page of results. `page` is the 1-based page number.
    #[must_use]
    pub fn new(count: u64, page: u64, results: Vec<T>) -> Self {
        Self {
            count,
            next: (page * PAGE_SIZE < count).then(|| page + 1),
            previous: (page > 1).then(|| page - 1),
            results,
        }
    }
}

/// Category wire format.
#[derive(Debug, Serialize)]
pub struct CategoryOut {
    /// Row id
    pub id: i64,
    /// Display name
    pub name: String,
    /// URL-safe slug
    pub slug: String,
}

impl From<category::Model> for CategoryOut {
    fn from(model: category::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            slug: model.slug,
        }
    }
}

/// Product image wire format; `image` is the resolved absolute URL.
#[derive(Debug, Serialize)]
pub struct ImageOut {
    /// Row id
    pub id: i64,
    /// Absolute URL, or null when no upload exists
    pub image: Option<String>,
    /// Whether this is the product's main image
    pub is_main: bool,
    /// Gallery position
    pub ordering: i32,
}

impl ImageOut {
    /// Resolves the storage reference against the media configuration.
    #[must_use]
    pub fn from_model(model: product_image::Model, config: &AppConfig) -> Self {
        Self {
            id: model.id,
            image: model.image.as_deref().map(|r| config.media_url(r)),
            is_main: model.is_main,
            ordering: model.ordering,
        }
    }
}

/// Review wire format.
#[derive(Debug, Serialize)]
pub struct ReviewOut {
    /// Row id
    pub id: i64,
    /// Reviewer display name
    pub customer_name: String,
    /// Star rating
    pub rating: i32,
    /// Review text
    pub comment: String,
    /// Creation timestamp
    pub created_at: NaiveDateTime,
}

impl From<review::Model> for ReviewOut {
    fn from(model: review::Model) -> Self {
        Self {
            id: model.id,
            customer_name: model.customer_name,
            rating: model.rating,
            comment: model.comment,
            created_at: model.created_at,
        }
    }
}

/// Pricing plan wire format.
#[derive(Debug, Serialize)]
pub struct PlanOut {
    /// Row id
    pub id: i64,
    /// Display title
    pub title: String,
    /// Plan length in months; 0 means lifetime
    pub duration_months: i32,
    /// Plan price, rendered as a decimal string
    pub price: Decimal,
}

impl From<product_plan::Model> for PlanOut {
    fn from(model: product_plan::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            duration_months: model.duration_months,
            price: model.price,
        }
    }
}

/// Product wire format with nested related rows and the computed
/// `main_image` URL.
#[derive(Debug, Serialize)]
pub struct ProductOut {
    /// Row id
    pub id: i64,
    /// Display title
    pub title: String,
    /// Rich-text description (opaque HTML)
    pub description: String,
    /// Base price, rendered as a decimal string, or null
    pub price: Option<Decimal>,
    /// Visibility flag
    pub status: bool,
    /// Linked categories
    pub categories: Vec<CategoryOut>,
    /// Gallery images in display order
    pub images: Vec<ImageOut>,
    /// URL of the flagged main image, else the first by ordering, else null
    pub main_image: Option<String>,
    /// Customer reviews, newest first
    pub reviews: Vec<ReviewOut>,
    /// Pricing plans, shortest duration first
    pub plans: Vec<PlanOut>,
    /// Creation timestamp
    pub created_at: NaiveDateTime,
    /// Last-modified timestamp
    pub updated_at: NaiveDateTime,
}

impl ProductOut {
    /// Builds the wire shape from an eager-loaded product.
    ///
    /// The `main_image` selection mirrors the stored data, not insertion
    /// order: the image flagged main wins; with no flag the first image in
    /// gallery order is used; with no images at all it is null.
    #[must_use]
    pub fn from_related(loaded: ProductWithRelated, config: &AppConfig) -> Self {
        let main_image = loaded
            .images
            .iter()
            .find(|image| image.is_main)
            .or_else(|| loaded.images.first())
            .and_then(|image| image.image.as_deref())
            .map(|reference| config.media_url(reference));

        Self {
            id: loaded.product.id,
            title: loaded.product.title,
            description: loaded.product.description,
            price: loaded.product.price,
            status: loaded.product.status,
            categories: loaded.categories.into_iter().map(CategoryOut::from).collect(),
            images: loaded
                .images
                .into_iter()
                .map(|image| ImageOut::from_model(image, config))
                .collect(),
            main_image,
            reviews: loaded.reviews.into_iter().map(ReviewOut::from).collect(),
            plans: loaded.plans.into_iter().map(PlanOut::from).collect(),
            created_at: loaded.product.created_at,
            updated_at: loaded.product.updated_at,
        }
    }
}

/// Singleton settings wire format.
#[derive(Debug, Serialize)]
pub struct WhatsAppOut {
    /// Contact number in `+92XXXXXXXXXX` format
    pub whatsapp_number: String,
}

impl From<whatsapp_settings::Model> for WhatsAppOut {
    fn from(model: whatsapp_settings::Model) -> Self {
        Self {
            whatsapp_number: model.whatsapp_number,
        }
    }
}

const fn default_true() -> bool {
    true
}

/// Full category payload (create and PUT).
#[derive(Debug, Deserialize)]
pub struct CategoryIn {
    /// Display name
    pub name: String,
    /// Explicit slug; derived from the name when omitted
    pub slug: Option<String>,
    /// Visibility flag, defaults to active
    #[serde(default = "default_true")]
    pub status: bool,
}

/// Partial category payload (PATCH).
#[derive(Debug, Default, Deserialize)]
pub struct CategoryPatch {
    /// New name
    pub name: Option<String>,
    /// New slug
    pub slug: Option<String>,
    /// New visibility flag
    pub status: Option<bool>,
}

/// Full product payload (create and PUT).
#[derive(Debug, Deserialize)]
pub struct ProductIn {
    /// Display title
    pub title: String,
    /// Rich-text description (opaque HTML)
    pub description: String,
    /// Rich-text notes, defaults to empty
    #[serde(default)]
    pub notes: String,
    /// Optional base price
    pub price: Option<Decimal>,
    /// Visibility flag, defaults to active
    #[serde(default = "default_true")]
    pub status: bool,
    /// Ids of categories to link, defaults to none
    #[serde(default)]
    pub categories: Vec<i64>,
}

/// Partial product payload (PATCH).
#[derive(Debug, Default, Deserialize)]
pub struct ProductPatch {
    /// New title
    pub title: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New notes
    pub notes: Option<String>,
    /// New price
    pub price: Option<Decimal>,
    /// New visibility flag
    pub status: Option<bool>,
    /// Replacement category links
    pub categories: Option<Vec<i64>>,
}

/// Full image payload (create).
#[derive(Debug, Deserialize)]
pub struct ImageIn {
    /// Storage reference; may be null when the upload happens later
    pub image: Option<String>,
    /// Whether this image becomes the product's main image
    #[serde(default)]
    pub is_main: bool,
    /// Gallery position, defaults to 0
    #[serde(default)]
    pub ordering: i32,
}

/// Partial image payload (PATCH).
#[derive(Debug, Default, Deserialize)]
pub struct ImagePatch {
    /// New storage reference
    pub image: Option<String>,
    /// New main flag
    pub is_main: Option<bool>,
    /// New gallery position
    pub ordering: Option<i32>,
}

/// Full review payload (create and PUT).
#[derive(Debug, Deserialize)]
pub struct ReviewIn {
    /// Id of the product being reviewed
    pub product: i64,
    /// Reviewer display name
    pub customer_name: String,
    /// Star rating, must be positive
    pub rating: i32,
    /// Review text, defaults to empty
    #[serde(default)]
    pub comment: String,
    /// Visibility flag, defaults to active
    #[serde(default = "default_true")]
    pub status: bool,
}

/// Partial review payload (PATCH).
#[derive(Debug, Default, Deserialize)]
pub struct ReviewPatch {
    /// New reviewer name
    pub customer_name: Option<String>,
    /// New rating
    pub rating: Option<i32>,
    /// New comment
    pub comment: Option<String>,
    /// New visibility flag
    pub status: Option<bool>,
}

/// Full plan payload (create and PUT).
#[derive(Debug, Deserialize)]
pub struct PlanIn {
    /// Id of the product the plan belongs to
    pub product: i64,
    /// Display title
    pub title: String,
    /// Plan length in months; 0 means lifetime
    pub duration_months: i32,
    /// Plan price
    pub price: Decimal,
    /// Visibility flag, defaults to active
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Partial plan payload (PATCH).
#[derive(Debug, Default, Deserialize)]
pub struct PlanPatch {
    /// New title
    pub title: Option<String>,
    /// New duration
    pub duration_months: Option<i32>,
    /// New price
    pub price: Option<Decimal>,
    /// New visibility flag
    pub is_active: Option<bool>,
}
