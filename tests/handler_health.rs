mod common;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use bookstore::domain::repositories::{CartStorage, CartStorageResult};
use std::sync::Arc;

struct UnreachableStorage;

#[async_trait]
impl CartStorage for UnreachableStorage {
    async fn get(&self, _key: &str) -> CartStorageResult<Option<String>> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _blob: &str) -> CartStorageResult<()> {
        Ok(())
    }

    async fn remove(&self, _key: &str) -> CartStorageResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> bool {
        false
    }
}

#[tokio::test]
async fn test_health_endpoint_success() {
    let server = common::create_test_server();

    let response = server.get("/health").await;
    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["database"]["status"], "ok");
    assert_eq!(json["checks"]["cart_storage"]["status"], "ok");
    assert!(json.get("version").is_some());
}

#[tokio::test]
async fn test_health_endpoint_degraded() {
    let app = common::create_test_app(Arc::new(UnreachableStorage));
    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["cart_storage"]["status"], "error");
}
