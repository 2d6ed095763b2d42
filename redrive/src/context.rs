//! State shared by every handle created from one entry point

use bridge_traits::session::SessionProvider;
use std::fmt;
use std::sync::Arc;

use crate::client::RemoteResourceClient;
use crate::error::Result;
use crate::permission::PermissionBuilder;
use crate::schema::SchemaAdapter;

/// Version-bound collaborators threaded through handles.
///
/// Built once by [`ReDriveApp`](crate::ReDriveApp); handles hold it behind an
/// `Arc` and never mutate it.
pub(crate) struct DriveContext {
    pub schema: SchemaAdapter,
    pub permissions: PermissionBuilder,
    pub client: Arc<dyn RemoteResourceClient>,
    pub session: Arc<dyn SessionProvider>,
    pub api_base_url: String,
}

impl DriveContext {
    pub fn new(
        schema: SchemaAdapter,
        client: Arc<dyn RemoteResourceClient>,
        session: Arc<dyn SessionProvider>,
        api_base_url: impl Into<String>,
    ) -> Self {
        Self {
            permissions: PermissionBuilder::new(schema.version()),
            schema,
            client,
            session,
            api_base_url: api_base_url.into(),
        }
    }

    /// E-mail of the user the session acts for
    pub async fn effective_user_email(&self) -> Result<String> {
        Ok(self.session.effective_user_email().await?)
    }
}

impl fmt::Debug for DriveContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DriveContext")
            .field("version", &self.schema.version())
            .field("api_base_url", &self.api_base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::client::{ListQuery, RequestOptions};
    use crate::error::Result;
    use crate::permission::PermissionResource;
    use crate::types::{Blob, FetchResponse, Resource, ResourceList};
    use async_trait::async_trait;
    use bridge_traits::error::Result as BridgeResult;
    use core_runtime::ApiVersion;
    use mockall::mock;

    mock! {
        pub Remote {}

        #[async_trait]
        impl RemoteResourceClient for Remote {
            async fn get(&self, file_id: &str) -> Result<Resource>;
            async fn insert(&self, metadata: Resource, content: Option<Blob>) -> Result<Resource>;
            async fn update(
                &self,
                fields: Resource,
                file_id: &str,
                options: RequestOptions,
            ) -> Result<Resource>;
            async fn copy(&self, metadata: Resource, file_id: &str) -> Result<Resource>;
            async fn trash(&self, file_id: &str, options: RequestOptions) -> Result<Resource>;
            async fn untrash(&self, file_id: &str, options: RequestOptions) -> Result<Resource>;
            async fn list(&self, query: &ListQuery) -> Result<ResourceList>;
            async fn create_permission(
                &self,
                resource: &PermissionResource,
                file_id: &str,
            ) -> Result<Resource>;
            async fn fetch(&self, url: &str) -> Result<FetchResponse>;
        }
    }

    mock! {
        pub Session {}

        #[async_trait]
        impl SessionProvider for Session {
            async fn access_token(&self) -> BridgeResult<String>;
            async fn effective_user_email(&self) -> BridgeResult<String>;
        }
    }

    pub const TEST_USER: &str = "dave@gleeda.net";
    pub const TEST_API_BASE: &str = "https://www.googleapis.com";

    pub fn context(version: ApiVersion, remote: MockRemote) -> Arc<DriveContext> {
        let mut session = MockSession::new();
        session
            .expect_effective_user_email()
            .returning(|| Ok(TEST_USER.to_string()));
        session
            .expect_access_token()
            .returning(|| Ok("test_token".to_string()));

        context_with_session(version, remote, session)
    }

    pub fn context_with_session(
        version: ApiVersion,
        remote: MockRemote,
        session: MockSession,
    ) -> Arc<DriveContext> {
        Arc::new(DriveContext::new(
            SchemaAdapter::new(version),
            Arc::new(remote),
            Arc::new(session),
            TEST_API_BASE,
        ))
    }
}
