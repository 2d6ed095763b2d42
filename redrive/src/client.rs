//! Remote resource boundary
//!
//! [`RemoteResourceClient`] is the only way handles reach the provider.
//! [`DriveRestClient`] implements it against the Drive REST endpoints through
//! the host's `HttpClient`, authenticating every call with the session token.

use async_trait::async_trait;
use bridge_traits::http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use bridge_traits::session::SessionProvider;
use bytes::{BufMut, Bytes, BytesMut};
use core_runtime::DriveConfig;
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::error::{ReDriveError, Result};
use crate::permission::PermissionResource;
use crate::schema::SchemaAdapter;
use crate::types::{Blob, FetchResponse, Resource, ResourceList};

const MULTIPART_BOUNDARY: &str = "redrive_related_5f1c9a7e3b2d4a06";

/// Per-request flags appended to the query string
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Allow the call to act on shared-drive items
    pub supports_all_drives: bool,
}

impl RequestOptions {
    pub fn all_drives() -> Self {
        Self {
            supports_all_drives: true,
        }
    }

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if self.supports_all_drives {
            pairs.push(("supportsAllDrives", "true".to_string()));
        }
        pairs
    }
}

/// Parameters of one files.list request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// Search expression in the provider's query language
    pub q: String,
    pub page_token: Option<String>,
    pub page_size: Option<u32>,
}

/// Operations the handles issue against the provider.
///
/// Resources are exchanged in the dialect of the configured API version.
/// Implementations perform one remote call per method and never retry.
#[async_trait]
pub trait RemoteResourceClient: Send + Sync {
    /// files.get
    async fn get(&self, file_id: &str) -> Result<Resource>;

    /// files.insert (v2) / files.create (v3), with optional media content
    async fn insert(&self, metadata: Resource, content: Option<Blob>) -> Result<Resource>;

    /// Partial metadata update
    async fn update(
        &self,
        fields: Resource,
        file_id: &str,
        options: RequestOptions,
    ) -> Result<Resource>;

    /// files.copy
    async fn copy(&self, metadata: Resource, file_id: &str) -> Result<Resource>;

    /// files.trash (v2 only)
    async fn trash(&self, file_id: &str, options: RequestOptions) -> Result<Resource>;

    /// files.untrash (v2 only)
    async fn untrash(&self, file_id: &str, options: RequestOptions) -> Result<Resource>;

    /// One page of files.list
    async fn list(&self, query: &ListQuery) -> Result<ResourceList>;

    /// permissions.insert (v2) / permissions.create (v3)
    async fn create_permission(
        &self,
        resource: &PermissionResource,
        file_id: &str,
    ) -> Result<Resource>;

    /// Authenticated GET of an arbitrary URL, status left to the caller
    async fn fetch(&self, url: &str) -> Result<FetchResponse>;
}

/// Drive REST implementation of [`RemoteResourceClient`]
///
/// # Example
///
/// ```ignore
/// use redrive::client::DriveRestClient;
///
/// let client = DriveRestClient::from_config(&config);
/// let resource = client.get("1WkMoywAyqJMPuMg8F3xgbUFuuY4ziH4UzgGs7vIvGGE").await?;
/// ```
pub struct DriveRestClient {
    http_client: Arc<dyn HttpClient>,
    session: Arc<dyn SessionProvider>,
    schema: SchemaAdapter,
    api_base_url: String,
    upload_base_url: String,
    timeout: Duration,
}

impl DriveRestClient {
    pub fn from_config(config: &DriveConfig) -> Self {
        Self {
            http_client: Arc::clone(&config.http_client),
            session: Arc::clone(&config.session),
            schema: SchemaAdapter::new(config.api_version),
            api_base_url: config.api_base_url.clone(),
            upload_base_url: config.upload_base_url.clone(),
            timeout: config.request_timeout,
        }
    }

    fn files_url(&self) -> String {
        format!("{}/{}/files", self.api_base_url, self.schema.api_path())
    }

    fn file_url(&self, file_id: &str, suffix: &str) -> String {
        format!(
            "{}/{}{}",
            self.files_url(),
            urlencoding::encode(file_id),
            suffix
        )
    }

    /// Appends the dialect's response field selector, if any
    fn with_resource_fields(
        &self,
        mut pairs: Vec<(&'static str, String)>,
    ) -> Vec<(&'static str, String)> {
        if let Some(fields) = self.schema.resource_fields() {
            pairs.push(("fields", fields.to_string()));
        }
        pairs
    }

    async fn authorized(&self, method: HttpMethod, url: String) -> Result<HttpRequest> {
        let token = self.session.access_token().await?;
        Ok(HttpRequest::new(method, url)
            .bearer_token(token)
            .header("Accept", "application/json")
            .timeout(self.timeout))
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let method = request.method;
        let response = self.http_client.execute(request).await?;

        if !response.is_success() {
            warn!(?method, status = response.status, "Drive API request failed");
            return Err(ReDriveError::RemoteApiError {
                status_code: response.status,
                body: response.text_lossy(),
            });
        }

        debug!(?method, status = response.status, "Drive API request succeeded");
        Ok(response)
    }

    async fn send_for_resource(&self, request: HttpRequest) -> Result<Resource> {
        let response = self.send(request).await?;
        if response.body.is_empty() {
            return Ok(Value::Object(Map::new()));
        }

        serde_json::from_slice(&response.body).map_err(|e| {
            ReDriveError::ParseError(format!("Failed to parse Drive resource: {}", e))
        })
    }

    fn multipart_body(metadata: &Resource, content: &Blob) -> Result<Bytes> {
        let metadata = serde_json::to_vec(metadata).map_err(|e| {
            ReDriveError::ParseError(format!("Failed to serialize metadata: {}", e))
        })?;

        let mut body = BytesMut::with_capacity(metadata.len() + content.bytes().len() + 256);
        body.put_slice(format!("--{}\r\n", MULTIPART_BOUNDARY).as_bytes());
        body.put_slice(b"Content-Type: application/json; charset=UTF-8\r\n\r\n");
        body.put_slice(&metadata);
        body.put_slice(format!("\r\n--{}\r\n", MULTIPART_BOUNDARY).as_bytes());
        body.put_slice(format!("Content-Type: {}\r\n\r\n", content.content_type()).as_bytes());
        body.put_slice(content.bytes());
        body.put_slice(format!("\r\n--{}--", MULTIPART_BOUNDARY).as_bytes());

        Ok(body.freeze())
    }
}

fn with_query(url: String, pairs: &[(&str, String)]) -> String {
    if pairs.is_empty() {
        return url;
    }

    let query = pairs
        .iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{}{}{}", url, separator, query)
}

#[async_trait]
impl RemoteResourceClient for DriveRestClient {
    #[instrument(skip(self))]
    async fn get(&self, file_id: &str) -> Result<Resource> {
        info!("Getting metadata for file");

        let url = with_query(
            self.file_url(file_id, ""),
            &self.with_resource_fields(RequestOptions::all_drives().query_pairs()),
        );
        let request = self.authorized(HttpMethod::Get, url).await?;
        self.send_for_resource(request).await
    }

    #[instrument(skip(self, metadata, content), fields(has_content = content.is_some()))]
    async fn insert(&self, metadata: Resource, content: Option<Blob>) -> Result<Resource> {
        info!("Inserting file");

        let request = match content {
            None => self
                .authorized(
                    HttpMethod::Post,
                    with_query(self.files_url(), &self.with_resource_fields(Vec::new())),
                )
                .await?
                .json(&metadata)?,
            Some(blob) => {
                let url = with_query(
                    format!(
                        "{}/{}/files?uploadType=multipart",
                        self.upload_base_url,
                        self.schema.api_path()
                    ),
                    &self.with_resource_fields(Vec::new()),
                );
                let body = Self::multipart_body(&metadata, &blob)?;
                self.authorized(HttpMethod::Post, url).await?.body(
                    body,
                    format!("multipart/related; boundary={}", MULTIPART_BOUNDARY),
                )
            }
        };

        self.send_for_resource(request).await
    }

    #[instrument(skip(self, fields))]
    async fn update(
        &self,
        fields: Resource,
        file_id: &str,
        options: RequestOptions,
    ) -> Result<Resource> {
        info!("Updating file metadata");

        let url = with_query(
            self.file_url(file_id, ""),
            &self.with_resource_fields(options.query_pairs()),
        );
        let request = self.authorized(HttpMethod::Patch, url).await?.json(&fields)?;
        self.send_for_resource(request).await
    }

    #[instrument(skip(self, metadata))]
    async fn copy(&self, metadata: Resource, file_id: &str) -> Result<Resource> {
        info!("Copying file");

        let url = with_query(
            self.file_url(file_id, "/copy"),
            &self.with_resource_fields(RequestOptions::all_drives().query_pairs()),
        );
        let request = self.authorized(HttpMethod::Post, url).await?.json(&metadata)?;
        self.send_for_resource(request).await
    }

    #[instrument(skip(self))]
    async fn trash(&self, file_id: &str, options: RequestOptions) -> Result<Resource> {
        info!("Trashing file");

        let url = with_query(self.file_url(file_id, "/trash"), &options.query_pairs());
        let request = self.authorized(HttpMethod::Post, url).await?;
        self.send_for_resource(request).await
    }

    #[instrument(skip(self))]
    async fn untrash(&self, file_id: &str, options: RequestOptions) -> Result<Resource> {
        info!("Restoring file from trash");

        let url = with_query(self.file_url(file_id, "/untrash"), &options.query_pairs());
        let request = self.authorized(HttpMethod::Post, url).await?;
        self.send_for_resource(request).await
    }

    #[instrument(skip(self), fields(q = %query.q))]
    async fn list(&self, query: &ListQuery) -> Result<ResourceList> {
        let mut pairs = vec![("q", query.q.clone())];
        if let Some(page_size) = query.page_size {
            pairs.push((self.schema.page_size_param(), page_size.to_string()));
        }
        if let Some(page_token) = &query.page_token {
            pairs.push(("pageToken", page_token.clone()));
        }
        if let Some(fields) = self.schema.list_fields() {
            pairs.push(("fields", fields.to_string()));
        }

        let request = self
            .authorized(HttpMethod::Get, with_query(self.files_url(), &pairs))
            .await?;
        let page = self.send_for_resource(request).await?;

        let items = match page.get(self.schema.list_items_field()) {
            Some(Value::Array(items)) => items.clone(),
            _ => Vec::new(),
        };
        let next_page_token = page
            .get("nextPageToken")
            .and_then(Value::as_str)
            .map(str::to_string);

        info!("Listed {} files from Google Drive", items.len());
        Ok(ResourceList {
            items,
            next_page_token,
        })
    }

    #[instrument(skip(self, resource), fields(role = ?resource.role))]
    async fn create_permission(
        &self,
        resource: &PermissionResource,
        file_id: &str,
    ) -> Result<Resource> {
        info!("Creating permission");

        let request = self
            .authorized(HttpMethod::Post, self.file_url(file_id, "/permissions"))
            .await?
            .json(resource)?;
        self.send_for_resource(request).await
    }

    #[instrument(skip(self))]
    async fn fetch(&self, url: &str) -> Result<FetchResponse> {
        let request = self.authorized(HttpMethod::Get, url.to_string()).await?;
        let response = self.http_client.execute(request).await?;

        debug!(status = response.status, bytes = response.body.len(), "Fetched URL");
        Ok(FetchResponse {
            status_code: response.status,
            body: response.body,
        })
    }
}
