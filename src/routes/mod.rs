use std::sync::Arc;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{db::CatalogStore, middleware};

pub mod recommendations;

/// Creates the application router with all routes
///
/// The catalog store is the router state, so tests can swap in any
/// `CatalogStore` implementation.
pub fn create_router(catalog: Arc<dyn CatalogStore>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/recommendations/:retailer_id",
            get(recommendations::recommend),
        )
        .with_state(catalog)
        .layer(TraceLayer::new_for_http().make_span_with(middleware::make_span))
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(CorsLayer::permissive())
}

/// Health check endpoint
async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryCatalogStore;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_check_body() {
        let app = create_router(Arc::new(MemoryCatalogStore::new()));
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn test_responses_carry_a_request_id() {
        let app = create_router(Arc::new(MemoryCatalogStore::new()));
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert!(response.headers().contains_key(middleware::REQUEST_ID_HEADER));
    }
}
