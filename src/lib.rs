//! `catalog-api` - A product catalog backend with a JSON REST API
//!
//! This crate provides a content-managed e-commerce catalog: products with
//! images, pricing plans and customer reviews, organized into categories,
//! plus a singleton WhatsApp contact setting. Reads are public (active rows
//! only), writes require an authenticated staff bearer token.

// Deny the most critical lints that could lead to bugs or security issues
#![deny(
    // Security and correctness
    unsafe_code,
    unsafe_op_in_unsafe_fn,

    // Code quality - things that are almost always bugs
    unreachable_code,
    unreachable_patterns,
    unused_must_use,

    // Documentation - broken links are bugs
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
)]
// Warn on things that should be fixed but aren't necessarily bugs
#![warn(
    missing_docs,

    clippy::all,
    clippy::pedantic,

    // Performance
    clippy::inefficient_to_string,
    clippy::needless_pass_by_value,

    // Correctness
    clippy::dbg_macro,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used,

    // Future compatibility
    future_incompatible,
    rust_2018_idioms,
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,  // Common pattern in Rust
    clippy::missing_errors_doc,        // Will add gradually
    clippy::missing_panics_doc,        // Will add gradually
)]

/// HTTP interface - router, handlers, authentication, and wire schemas
pub mod api;
/// Configuration management for database and application settings
pub mod config;
/// Core business logic - framework-agnostic catalog operations
pub mod core;
/// SeaORM entity definitions for database tables
pub mod entities;
/// Unified error types and result handling
pub mod errors;

#[cfg(test)]
pub mod test_utils;
