//! HTTP interface - router, shared state, and request handlers.
//!
//! The router wires the catalog's CRUD endpoints to the `core` layer, with
//! the access policy expressed through the extractors in [`auth`]: reads
//! resolve a [`crate::core::Role`], writes demand a staff access token.
//! CORS and per-request tracing are layered on the whole router.

/// JWT issuance/refresh and the authorization extractors
pub mod auth;
/// Category endpoints
pub mod categories;
/// Product image endpoints
pub mod images;
/// Pricing plan endpoints
pub mod plans;
/// Product endpoints
pub mod products;
/// Review endpoints
pub mod reviews;
/// Wire-format schemas and pagination
pub mod schemas;
/// Singleton WhatsApp settings endpoint
pub mod settings;

use crate::config::AppConfig;
use axum::Router;
use axum::routing::{get, patch, post};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared state available to all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection for all catalog operations
    pub db: DatabaseConnection,
    /// Runtime configuration (JWT secret, media base URL, staff account)
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Creates the shared state handed to the router.
    #[must_use]
    pub fn new(db: DatabaseConnection, config: Arc<AppConfig>) -> Self {
        Self { db, config }
    }
}

/// Builds the full application router.
#[must_use]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/categories/",
            get(categories::list).post(categories::create),
        )
        .route(
            "/api/categories/:id/",
            get(categories::retrieve)
                .put(categories::update_full)
                .patch(categories::update_partial)
                .delete(categories::destroy),
        )
        .route("/api/products/", get(products::list).post(products::create))
        .route(
            "/api/products/:id/",
            get(products::retrieve)
                .put(products::update_full)
                .patch(products::update_partial)
                .delete(products::destroy),
        )
        .route(
            "/api/products/:id/images/",
            get(images::list).post(images::create),
        )
        .route(
            "/api/products/:id/images/:image_id/set-main/",
            post(images::set_main),
        )
        .route(
            "/api/images/:id/",
            patch(images::update_partial).delete(images::destroy),
        )
        .route("/api/reviews/", get(reviews::list).post(reviews::create))
        .route(
            "/api/reviews/:id/",
            get(reviews::retrieve)
                .put(reviews::update_full)
                .patch(reviews::update_partial)
                .delete(reviews::destroy),
        )
        .route("/api/plans/", get(plans::list).post(plans::create))
        .route(
            "/api/plans/:id/",
            get(plans::retrieve)
                .put(plans::update_full)
                .patch(plans::update_partial)
                .delete(plans::destroy),
        )
        .route("/api/whatsapp/", get(settings::retrieve))
        .route("/api/token/", post(auth::obtain_token))
        .route("/api/token/refresh/", post(auth::refresh_token))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::category::create_category;
    use crate::entities::WhatsAppSettings;
    use crate::errors::Result;
    use crate::test_utils::setup_test_state;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use sea_orm::{EntityTrait, PaginatorTrait};
    use tower::ServiceExt;

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, token: Option<&str>, body: serde_json::Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn staff_token(state: &AppState) -> String {
        auth::issue_access_token(&state.config.jwt_secret, "admin", true).unwrap()
    }

    #[tokio::test]
    async fn test_whatsapp_get_or_create_is_idempotent() -> Result<()> {
        let state = setup_test_state().await?;
        let app = router(state.clone());

        let first = app
            .clone()
            .oneshot(get_request("/api/whatsapp/", None))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);
        assert_eq!(
            body_json(first).await,
            serde_json::json!({ "whatsapp_number": "+923001234567" })
        );

        let second = app
            .oneshot(get_request("/api/whatsapp/", None))
            .await
            .unwrap();
        assert_eq!(
            body_json(second).await,
            serde_json::json!({ "whatsapp_number": "+923001234567" })
        );
        assert_eq!(WhatsAppSettings::find().count(&state.db).await?, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_category_list_visibility_by_caller() -> Result<()> {
        let state = setup_test_state().await?;
        create_category(&state.db, "Visible".to_string(), None, true).await?;
        create_category(&state.db, "Hidden".to_string(), None, false).await?;

        let app = router(state.clone());

        let anonymous = app
            .clone()
            .oneshot(get_request("/api/categories/", None))
            .await
            .unwrap();
        let body = body_json(anonymous).await;
        assert_eq!(body["count"], 1);
        assert_eq!(body["results"][0]["name"], "Visible");

        let token = staff_token(&state);
        let staff = app
            .oneshot(get_request("/api/categories/", Some(&token)))
            .await
            .unwrap();
        let body = body_json(staff).await;
        assert_eq!(body["count"], 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_writes_require_staff_token() -> Result<()> {
        let state = setup_test_state().await?;
        let app = router(state.clone());
        let payload = serde_json::json!({ "name": "Gift Cards" });

        // No credentials at all
        let anonymous = app
            .clone()
            .oneshot(post_json("/api/categories/", None, payload.clone()))
            .await
            .unwrap();
        assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

        // Authenticated but not staff
        let non_staff =
            auth::issue_access_token(&state.config.jwt_secret, "customer", false).unwrap();
        let forbidden = app
            .clone()
            .oneshot(post_json(
                "/api/categories/",
                Some(&non_staff),
                payload.clone(),
            ))
            .await
            .unwrap();
        assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

        // Staff token succeeds
        let token = staff_token(&state);
        let created = app
            .oneshot(post_json("/api/categories/", Some(&token), payload))
            .await
            .unwrap();
        assert_eq!(created.status(), StatusCode::CREATED);
        let body = body_json(created).await;
        assert_eq!(body["slug"], "gift-cards");

        Ok(())
    }

    #[tokio::test]
    async fn test_garbage_bearer_token_is_rejected_on_reads() -> Result<()> {
        let state = setup_test_state().await?;
        let app = router(state);

        let response = app
            .oneshot(get_request("/api/categories/", Some("not-a-token")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        Ok(())
    }

    #[tokio::test]
    async fn test_token_obtain_and_refresh_flow() -> Result<()> {
        let state = setup_test_state().await?;
        let app = router(state.clone());

        // Wrong password
        let rejected = app
            .clone()
            .oneshot(post_json(
                "/api/token/",
                None,
                serde_json::json!({ "username": "admin", "password": "wrong" }),
            ))
            .await
            .unwrap();
        assert_eq!(rejected.status(), StatusCode::UNAUTHORIZED);

        // Right credentials
        let issued = app
            .clone()
            .oneshot(post_json(
                "/api/token/",
                None,
                serde_json::json!({
                    "username": state.config.admin_username,
                    "password": state.config.admin_password,
                }),
            ))
            .await
            .unwrap();
        assert_eq!(issued.status(), StatusCode::OK);
        let pair = body_json(issued).await;

        // The issued access token authorizes a write
        let access = pair["access"].as_str().unwrap().to_string();
        let created = app
            .clone()
            .oneshot(post_json(
                "/api/categories/",
                Some(&access),
                serde_json::json!({ "name": "Streaming" }),
            ))
            .await
            .unwrap();
        assert_eq!(created.status(), StatusCode::CREATED);

        // A refresh token cannot be used as an access token
        let refresh = pair["refresh"].as_str().unwrap().to_string();
        let misused = app
            .clone()
            .oneshot(post_json(
                "/api/categories/",
                Some(&refresh),
                serde_json::json!({ "name": "Nope" }),
            ))
            .await
            .unwrap();
        assert_eq!(misused.status(), StatusCode::FORBIDDEN);

        // But it does mint a fresh access token
        let refreshed = app
            .oneshot(post_json(
                "/api/token/refresh/",
                None,
                serde_json::json!({ "refresh": refresh }),
            ))
            .await
            .unwrap();
        assert_eq!(refreshed.status(), StatusCode::OK);
        assert!(body_json(refreshed).await["access"].is_string());

        Ok(())
    }

    #[tokio::test]
    async fn test_product_crud_over_http() -> Result<()> {
        let state = setup_test_state().await?;
        let category = create_category(&state.db, "Streaming".to_string(), None, true).await?;
        let app = router(state.clone());
        let token = staff_token(&state);

        let created = app
            .clone()
            .oneshot(post_json(
                "/api/products/",
                Some(&token),
                serde_json::json!({
                    "title": "Netflix",
                    "description": "<p>Premium</p>",
                    "price": "10.99",
                    "categories": [category.id],
                }),
            ))
            .await
            .unwrap();
        assert_eq!(created.status(), StatusCode::CREATED);
        let body = body_json(created).await;
        let id = body["id"].as_i64().unwrap();
        assert_eq!(body["price"], "10.99");
        assert_eq!(body["categories"][0]["slug"], "streaming");
        assert!(body["main_image"].is_null());

        // Attach an image and flag it main through the explicit route
        let image = app
            .clone()
            .oneshot(post_json(
                &format!("/api/products/{id}/images/"),
                Some(&token),
                serde_json::json!({ "image": "covers/netflix.png", "ordering": 0 }),
            ))
            .await
            .unwrap();
        assert_eq!(image.status(), StatusCode::CREATED);
        let image_id = body_json(image).await["id"].as_i64().unwrap();

        let flagged = app
            .clone()
            .oneshot(post_json(
                &format!("/api/products/{id}/images/{image_id}/set-main/"),
                Some(&token),
                serde_json::json!({}),
            ))
            .await
            .unwrap();
        assert_eq!(flagged.status(), StatusCode::OK);

        let fetched = app
            .clone()
            .oneshot(get_request(&format!("/api/products/{id}/"), None))
            .await
            .unwrap();
        let body = body_json(fetched).await;
        assert_eq!(
            body["main_image"],
            state.config.media_url("covers/netflix.png")
        );

        // Delete and confirm it is gone
        let deleted = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/products/{id}/"))
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

        let missing = app
            .oneshot(get_request(&format!("/api/products/{id}/"), None))
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        Ok(())
    }

    #[tokio::test]
    async fn test_validation_error_carries_field_detail() -> Result<()> {
        let state = setup_test_state().await?;
        let token = staff_token(&state);
        let app = router(state.clone());

        let product = app
            .clone()
            .oneshot(post_json(
                "/api/products/",
                Some(&token),
                serde_json::json!({ "title": "Netflix", "description": "" }),
            ))
            .await
            .unwrap();
        let product_id = body_json(product).await["id"].as_i64().unwrap();

        let rejected = app
            .oneshot(post_json(
                "/api/reviews/",
                Some(&token),
                serde_json::json!({
                    "product": product_id,
                    "customer_name": "Asad",
                    "rating": -3,
                }),
            ))
            .await
            .unwrap();
        assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);
        let body = body_json(rejected).await;
        assert!(body["rating"][0].is_string());

        Ok(())
    }
}
