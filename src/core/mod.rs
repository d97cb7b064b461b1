//! Core business logic for the catalog.
//!
//! Everything in this module is framework-agnostic: functions take a
//! [`sea_orm::DatabaseConnection`] and return domain models, leaving HTTP
//! concerns to the `api` layer. Every read operation takes a [`Role`] so
//! the caller's visibility is an explicit parameter instead of something
//! inferred from the request method deep inside a query builder.

/// Category operations - slug derivation, CRUD, visibility filtering
pub mod category;
/// Product image operations - gallery management and the main-image invariant
pub mod image;
/// Pricing plan operations - CRUD with the product/duration uniqueness rule
pub mod plan;
/// Product operations - CRUD with eager-loaded related rows
pub mod product;
/// Review operations - CRUD with rating validation
pub mod review;
/// Singleton WhatsApp settings operations
pub mod settings;

/// Number of items returned per list page.
pub const PAGE_SIZE: u64 = 10;

/// Who is asking. Public callers only see active rows; staff see everything
/// (so inactive items stay manageable through the same endpoints).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Anonymous or non-staff caller - active rows only
    Public,
    /// Authenticated staff caller - all rows
    Staff,
}

impl Role {
    /// Whether this caller may see rows with the active flag unset.
    #[must_use]
    pub const fn sees_inactive(self) -> bool {
        matches!(self, Self::Staff)
    }
}
