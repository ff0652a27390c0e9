//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`  - Health check: database, cart storage
//! - `/api/*`        - Catalog, session and cart REST API
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on `/api` (configurable for proxy deployments)
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    let api_router = api_router();

    let api_router = if behind_proxy {
        api_router.layer(rate_limit::layer(rate_limit::forwarded_ip()))
    } else {
        api_router.layer(rate_limit::layer(rate_limit::peer_ip()))
    };

    let router = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

/// The `/api` routes without rate limiting.
///
/// Used by [`app_router`] and by tests that drive the API without a peer
/// socket address.
pub fn api_router() -> Router<AppState> {
    api::routes::catalog_routes().merge(api::routes::cart_routes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::MemoryBookRepository;
    use crate::infrastructure::session::MemoryCartStorage;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn state() -> AppState {
        AppState::new(
            Arc::new(MemoryBookRepository::default()),
            Arc::new(MemoryCartStorage::new()),
            100,
        )
    }

    #[tokio::test]
    async fn test_trailing_slash_is_normalized() {
        let app = app_router(state(), true);

        let request = Request::builder()
            .uri("/api/books/")
            .header("x-forwarded-for", "203.0.113.7")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_is_outside_rate_limited_api() {
        let app = app_router(state(), false);

        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
