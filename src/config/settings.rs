//! Application settings loaded from environment variables.
//!
//! Everything the server needs at startup comes from the environment
//! (optionally via a `.env` file loaded in `main`): the bind address, the
//! database URL, the JWT signing secret, the media base URL used to resolve
//! image references, and the credentials of the single staff account that
//! can obtain write-capable tokens.

use crate::errors::{Error, Result};

/// Runtime configuration shared across the application
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP server binds to (`BIND_ADDR`, default `0.0.0.0:8000`)
    pub bind_addr: String,
    /// SeaORM connection string (`DATABASE_URL`)
    pub database_url: String,
    /// HS256 secret for signing and verifying bearer tokens (`JWT_SECRET`)
    pub jwt_secret: String,
    /// Base URL prepended to relative image references (`MEDIA_BASE_URL`)
    pub media_base_url: String,
    /// Username of the staff account (`ADMIN_USERNAME`)
    pub admin_username: String,
    /// Password of the staff account (`ADMIN_PASSWORD`)
    pub admin_password: String,
}

impl AppConfig {
    /// Loads the configuration from the process environment.
    ///
    /// # Errors
    /// Returns a [`Error::Config`] naming the variable if `JWT_SECRET`,
    /// `ADMIN_USERNAME`, or `ADMIN_PASSWORD` is missing.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string()),
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://data/catalog.sqlite?mode=rwc".to_string()),
            jwt_secret: require_var("JWT_SECRET")?,
            media_base_url: std::env::var("MEDIA_BASE_URL").unwrap_or_default(),
            admin_username: require_var("ADMIN_USERNAME")?,
            admin_password: require_var("ADMIN_PASSWORD")?,
        })
    }

    /// Resolves an image storage reference to an absolute URL.
    ///
    /// References that are already absolute pass through untouched; relative
    /// references are joined onto `media_base_url`.
    #[must_use]
    pub fn media_url(&self, reference: &str) -> String {
        if reference.starts_with("http://") || reference.starts_with("https://") {
            return reference.to_string();
        }
        format!(
            "{}/{}",
            self.media_base_url.trim_end_matches('/'),
            reference.trim_start_matches('/')
        )
    }
}

fn require_var(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| Error::Config {
        message: format!("{name} is not set in environment variables"),
    })
}
