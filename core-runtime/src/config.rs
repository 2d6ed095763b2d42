//! # Drive Configuration Module
//!
//! Provides the configuration every ReDrive entry point is built from.
//!
//! ## Overview
//!
//! A [`DriveConfig`] bundles the Drive API version, the transport and session
//! bridges and the endpoint roots. The builder enforces fail-fast validation:
//! no entry point can exist without a valid API version, which replaces the
//! "call `setApiVersion` before anything else" convention with a
//! construction-time requirement.
//!
//! ## Required
//!
//! - API version (2 or 3)
//! - `SessionProvider` - token and effective user e-mail
//!
//! ## Optional (with platform defaults)
//!
//! - `HttpClient` - desktop default `ReqwestHttpClient` when the
//!   `desktop-shims` feature is enabled
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::config::DriveConfig;
//! use std::sync::Arc;
//!
//! let config = DriveConfig::builder()
//!     .api_version(2)
//!     .session(Arc::new(StaticSession::from_env()?))
//!     .build()?;
//! ```

use crate::error::{Error, Result};
use bridge_traits::{HttpClient, SessionProvider};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Default root for metadata endpoints
pub const DEFAULT_API_BASE_URL: &str = "https://www.googleapis.com";

/// Default root for media upload endpoints
pub const DEFAULT_UPLOAD_BASE_URL: &str = "https://www.googleapis.com/upload";

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Drive API schema dialect.
///
/// The two major versions name the same resource fields differently
/// (`title` vs `name`, `alternateLink` vs `webViewLink`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    V2,
    V3,
}

impl ApiVersion {
    pub fn number(&self) -> u8 {
        match self {
            ApiVersion::V2 => 2,
            ApiVersion::V3 => 3,
        }
    }
}

impl TryFrom<u8> for ApiVersion {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            2 => Ok(ApiVersion::V2),
            3 => Ok(ApiVersion::V3),
            other => Err(Error::InvalidVersion(other)),
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.number())
    }
}

/// Validated configuration for a ReDrive entry point.
#[derive(Clone)]
pub struct DriveConfig {
    pub api_version: ApiVersion,
    pub http_client: Arc<dyn HttpClient>,
    pub session: Arc<dyn SessionProvider>,
    /// Root of the metadata endpoints, without trailing slash
    pub api_base_url: String,
    /// Root of the media upload endpoints, without trailing slash
    pub upload_base_url: String,
    pub request_timeout: Duration,
}

impl fmt::Debug for DriveConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DriveConfig")
            .field("api_version", &self.api_version)
            .field("http_client", &"HttpClient { ... }")
            .field("session", &"SessionProvider { ... }")
            .field("api_base_url", &self.api_base_url)
            .field("upload_base_url", &self.upload_base_url)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl DriveConfig {
    pub fn builder() -> DriveConfigBuilder {
        DriveConfigBuilder::default()
    }
}

/// Builder for [`DriveConfig`].
///
/// Setters never fail; every check happens in [`build`](Self::build).
#[derive(Default)]
pub struct DriveConfigBuilder {
    api_version: Option<u8>,
    http_client: Option<Arc<dyn HttpClient>>,
    session: Option<Arc<dyn SessionProvider>>,
    api_base_url: Option<String>,
    upload_base_url: Option<String>,
    request_timeout: Option<Duration>,
}

impl DriveConfigBuilder {
    /// Sets the Drive API version (2 or 3).
    pub fn api_version(mut self, version: u8) -> Self {
        self.api_version = Some(version);
        self
    }

    pub fn http_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn session(mut self, session: Arc<dyn SessionProvider>) -> Self {
        self.session = Some(session);
        self
    }

    /// Overrides `https://www.googleapis.com`, e.g. to target a local fake.
    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = Some(url.into());
        self
    }

    pub fn upload_base_url(mut self, url: impl Into<String>) -> Self {
        self.upload_base_url = Some(url.into());
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Validates the collected settings and produces a [`DriveConfig`].
    ///
    /// # Errors
    ///
    /// - [`Error::VersionNotConfigured`] if no version was given
    /// - [`Error::InvalidVersion`] if the version is not 2 or 3
    /// - [`Error::CapabilityMissing`] if a required bridge is absent
    /// - [`Error::Config`] for empty endpoints or a zero timeout
    pub fn build(self) -> Result<DriveConfig> {
        let api_version = ApiVersion::try_from(self.api_version.ok_or(Error::VersionNotConfigured)?)?;

        let session = self.session.ok_or_else(|| Error::CapabilityMissing {
            capability: "SessionProvider".to_string(),
            message: "A SessionProvider is required to authenticate Drive requests. \
                      Desktop: use bridge_desktop::StaticSession. \
                      Other hosts: wrap the platform OAuth flow."
                .to_string(),
        })?;

        let request_timeout = self.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT);
        if request_timeout.is_zero() {
            return Err(Error::Config("Request timeout must be greater than 0".to_string()));
        }

        let http_client = match self.http_client {
            Some(client) => client,
            None => provide_default_http_client(request_timeout)?,
        };

        let api_base_url = normalize_base_url(
            self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL),
            "API base URL",
        )?;
        let upload_base_url = normalize_base_url(
            self.upload_base_url
                .as_deref()
                .unwrap_or(DEFAULT_UPLOAD_BASE_URL),
            "Upload base URL",
        )?;

        Ok(DriveConfig {
            api_version,
            http_client,
            session,
            api_base_url,
            upload_base_url,
            request_timeout,
        })
    }
}

fn normalize_base_url(url: &str, what: &str) -> Result<String> {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(Error::Config(format!("{} cannot be empty", what)));
    }
    Ok(trimmed.to_string())
}

#[cfg(feature = "desktop-shims")]
fn provide_default_http_client(timeout: Duration) -> Result<Arc<dyn HttpClient>> {
    use bridge_desktop::ReqwestHttpClient;

    let client = ReqwestHttpClient::with_timeout(timeout)
        .map_err(|e| Error::Internal(format!("Failed to create default HttpClient: {}", e)))?;
    Ok(Arc::new(client))
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_http_client(_timeout: Duration) -> Result<Arc<dyn HttpClient>> {
    Err(Error::CapabilityMissing {
        capability: "HttpClient".to_string(),
        message: "No HTTP client implementation provided. \
                  Desktop: enable the 'desktop-shims' feature. \
                  Other hosts: inject a platform HttpClient."
            .to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bridge_traits::error::Result as BridgeResult;
    use bridge_traits::{HttpRequest, HttpResponse};

    struct NoopHttp;

    #[async_trait]
    impl HttpClient for NoopHttp {
        async fn execute(&self, _request: HttpRequest) -> BridgeResult<HttpResponse> {
            unimplemented!("not used in config tests")
        }
    }

    struct NoopSession;

    #[async_trait]
    impl SessionProvider for NoopSession {
        async fn access_token(&self) -> BridgeResult<String> {
            Ok("token".to_string())
        }

        async fn effective_user_email(&self) -> BridgeResult<String> {
            Ok("me@example.com".to_string())
        }
    }

    fn complete_builder() -> DriveConfigBuilder {
        DriveConfig::builder()
            .http_client(Arc::new(NoopHttp))
            .session(Arc::new(NoopSession))
    }

    #[test]
    fn test_api_version_parsing() {
        assert_eq!(ApiVersion::try_from(2).unwrap(), ApiVersion::V2);
        assert_eq!(ApiVersion::try_from(3).unwrap(), ApiVersion::V3);
        assert!(matches!(
            ApiVersion::try_from(4),
            Err(Error::InvalidVersion(4))
        ));
        assert_eq!(ApiVersion::V3.to_string(), "v3");
    }

    #[test]
    fn test_missing_version_fails_first() {
        let result = DriveConfig::builder().build();
        assert!(matches!(result, Err(Error::VersionNotConfigured)));
    }

    #[test]
    fn test_invalid_version_rejected() {
        let result = complete_builder().api_version(4).build();
        assert!(matches!(result, Err(Error::InvalidVersion(4))));
    }

    #[test]
    fn test_missing_session_reported() {
        let result = DriveConfig::builder()
            .api_version(2)
            .http_client(Arc::new(NoopHttp))
            .build();

        match result {
            Err(Error::CapabilityMissing { capability, .. }) => {
                assert_eq!(capability, "SessionProvider")
            }
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_defaults_applied() {
        let config = complete_builder().api_version(3).build().unwrap();

        assert_eq!(config.api_version, ApiVersion::V3);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.upload_base_url, DEFAULT_UPLOAD_BASE_URL);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = complete_builder()
            .api_version(2)
            .api_base_url("http://localhost:8080/")
            .build()
            .unwrap();

        assert_eq!(config.api_base_url, "http://localhost:8080");
    }

    #[test]
    fn test_empty_base_url_rejected() {
        let result = complete_builder().api_version(2).api_base_url("  ").build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = complete_builder()
            .api_version(2)
            .request_timeout(Duration::ZERO)
            .build();
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
