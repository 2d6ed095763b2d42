//! ReDrive entry point

use core_runtime::{ApiVersion, DriveConfig, DriveConfigBuilder};
use serde_json::json;
use std::fmt;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::client::{DriveRestClient, RemoteResourceClient};
use crate::context::DriveContext;
use crate::error::{ReDriveError, Result};
use crate::file::FileHandle;
use crate::folder::FolderHandle;
use crate::iterator::{FileIterator, FolderIterator};
use crate::schema::{LogicalField, SchemaAdapter, FOLDER_MIME_TYPE, PLAIN_TEXT};
use crate::types::Blob;

/// Ways to create a file
#[derive(Debug, Clone)]
pub enum CreateFile {
    /// Name and type come from the blob; an unnamed blob becomes "Untitled"
    FromBlob(Blob),
    /// Plain text file
    FromContent { name: String, content: String },
    FromContentAndType {
        name: String,
        content: String,
        mime_type: String,
    },
}

const UNTITLED: &str = "Untitled";

/// DriveApp-style factory for file and folder handles.
///
/// The API version is fixed by the [`DriveConfig`] the app is built from, so
/// every handle it returns speaks the same schema dialect.
///
/// # Example
///
/// ```ignore
/// use redrive::{CreateFile, ReDriveApp};
///
/// let app = ReDriveApp::new(config);
/// let file = app
///     .create_file(CreateFile::FromContent {
///         name: "notes.txt".into(),
///         content: "test test test".into(),
///     })
///     .await?;
/// ```
#[derive(Clone)]
pub struct ReDriveApp {
    ctx: Arc<DriveContext>,
}

impl fmt::Debug for ReDriveApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReDriveApp").field("ctx", &self.ctx).finish()
    }
}

impl ReDriveApp {
    /// Entry point talking to the Drive REST API
    pub fn new(config: DriveConfig) -> Self {
        let client = Arc::new(DriveRestClient::from_config(&config));
        Self::with_client(config, client)
    }

    /// Entry point issuing every remote call through `client`
    pub fn with_client(config: DriveConfig, client: Arc<dyn RemoteResourceClient>) -> Self {
        info!(version = %config.api_version, "Initializing ReDrive");

        Self {
            ctx: Arc::new(DriveContext::new(
                SchemaAdapter::new(config.api_version),
                client,
                Arc::clone(&config.session),
                config.api_base_url,
            )),
        }
    }

    /// Build the configuration and the entry point in one step.
    ///
    /// # Errors
    ///
    /// [`ReDriveError::VersionNotConfigured`] when the builder carries no
    /// version, [`ReDriveError::InvalidVersion`] when it is not 2 or 3.
    pub fn from_builder(builder: DriveConfigBuilder) -> Result<Self> {
        Ok(Self::new(builder.build()?))
    }

    pub fn api_version(&self) -> ApiVersion {
        self.ctx.schema.version()
    }

    #[instrument(skip(self))]
    pub async fn get_file_by_id(&self, id: &str) -> Result<FileHandle> {
        let resource = self.ctx.client.get(id).await?;
        FileHandle::from_resource(Arc::clone(&self.ctx), &resource)
    }

    /// Folder with the given id; the MIME type is not checked.
    #[instrument(skip(self))]
    pub async fn get_folder_by_id(&self, id: &str) -> Result<FolderHandle> {
        Ok(FolderHandle::from_file(self.get_file_by_id(id).await?))
    }

    /// # Errors
    ///
    /// [`ReDriveError::UnsupportedInVersion`] on v3.
    #[instrument(skip(self, request))]
    pub async fn create_file(&self, request: CreateFile) -> Result<FileHandle> {
        self.require_create("createFile")?;

        let (name, blob) = match request {
            CreateFile::FromBlob(blob) => {
                (blob.name().unwrap_or(UNTITLED).to_string(), blob)
            }
            CreateFile::FromContent { name, content } => {
                let blob = Blob::from_text(content, PLAIN_TEXT);
                (name, blob)
            }
            CreateFile::FromContentAndType {
                name,
                content,
                mime_type,
            } => {
                let blob = Blob::from_text(content, mime_type);
                (name, blob)
            }
        };

        let metadata = self.ctx.schema.metadata(&[
            (LogicalField::Name, json!(name)),
            (LogicalField::MimeType, json!(blob.content_type())),
        ]);
        let resource = self.ctx.client.insert(metadata, Some(blob)).await?;
        let file = FileHandle::from_resource(Arc::clone(&self.ctx), &resource)?;

        info!(file_id = %file.get_id(), "Created file");
        Ok(file)
    }

    /// # Errors
    ///
    /// [`ReDriveError::UnsupportedInVersion`] on v3.
    #[instrument(skip(self))]
    pub async fn create_folder(&self, name: &str) -> Result<FolderHandle> {
        self.require_create("createFolder")?;

        let metadata = self.ctx.schema.metadata(&[
            (LogicalField::Name, json!(name)),
            (LogicalField::MimeType, json!(FOLDER_MIME_TYPE)),
        ]);
        let resource = self.ctx.client.insert(metadata, None).await?;
        let folder = FolderHandle::from_file(FileHandle::from_resource(
            Arc::clone(&self.ctx),
            &resource,
        )?);

        info!(folder_id = %folder.get_id(), "Created folder");
        Ok(folder)
    }

    /// Non-trashed files named exactly `name`, fetched lazily
    pub fn get_files_by_name(&self, name: &str) -> FileIterator {
        FileIterator::new(Arc::clone(&self.ctx), self.ctx.schema.name_query(name, None))
    }

    /// Non-trashed folders named exactly `name`, fetched lazily
    pub fn get_folders_by_name(&self, name: &str) -> FolderIterator {
        FolderIterator::new(
            Arc::clone(&self.ctx),
            self.ctx.schema.name_query(name, Some(FOLDER_MIME_TYPE)),
        )
    }

    /// Resume a file search from [`FileIterator::continuation_token`].
    pub fn continue_file_iterator(&self, token: &str) -> Result<FileIterator> {
        FileIterator::resume(Arc::clone(&self.ctx), token)
    }

    /// Resume a folder search from [`FolderIterator::continuation_token`].
    pub fn continue_folder_iterator(&self, token: &str) -> Result<FolderIterator> {
        FolderIterator::resume(Arc::clone(&self.ctx), token)
    }

    fn require_create(&self, operation: &'static str) -> Result<()> {
        if self.ctx.schema.supports_create() {
            Ok(())
        } else {
            Err(ReDriveError::UnsupportedInVersion {
                operation,
                version: self.api_version(),
            })
        }
    }
}
