//! Integration tests for configuration validation order

use async_trait::async_trait;
use bridge_traits::error::Result as BridgeResult;
use bridge_traits::{HttpClient, HttpRequest, HttpResponse, SessionProvider};
use core_runtime::{ApiVersion, DriveConfig, Error};
use std::sync::Arc;
use std::time::Duration;

struct OfflineHttp;

#[async_trait]
impl HttpClient for OfflineHttp {
    async fn execute(&self, _request: HttpRequest) -> BridgeResult<HttpResponse> {
        Err(bridge_traits::BridgeError::NotAvailable("offline".to_string()))
    }
}

struct FixedSession;

#[async_trait]
impl SessionProvider for FixedSession {
    async fn access_token(&self) -> BridgeResult<String> {
        Ok("token".to_string())
    }

    async fn effective_user_email(&self) -> BridgeResult<String> {
        Ok("owner@gleeda.net".to_string())
    }
}

#[test]
fn test_version_checked_before_capabilities() {
    // Nothing but an invalid version: the version error wins
    let result = DriveConfig::builder().api_version(1).build();
    assert!(matches!(result, Err(Error::InvalidVersion(1))));

    let result = DriveConfig::builder().http_client(Arc::new(OfflineHttp)).build();
    assert!(matches!(result, Err(Error::VersionNotConfigured)));
}

#[test]
fn test_zero_timeout_rejected() {
    let result = DriveConfig::builder()
        .api_version(2)
        .http_client(Arc::new(OfflineHttp))
        .session(Arc::new(FixedSession))
        .request_timeout(Duration::ZERO)
        .build();

    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_custom_endpoints_kept() {
    let config = DriveConfig::builder()
        .api_version(3)
        .http_client(Arc::new(OfflineHttp))
        .session(Arc::new(FixedSession))
        .api_base_url("http://127.0.0.1:9000")
        .upload_base_url("http://127.0.0.1:9000/upload/")
        .request_timeout(Duration::from_secs(5))
        .build()
        .unwrap();

    assert_eq!(config.api_version, ApiVersion::V3);
    assert_eq!(config.api_base_url, "http://127.0.0.1:9000");
    assert_eq!(config.upload_base_url, "http://127.0.0.1:9000/upload");
    assert_eq!(config.request_timeout, Duration::from_secs(5));
}
