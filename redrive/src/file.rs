//! File handle
//!
//! A [`FileHandle`] owns one [`FileRecord`] snapshot. Readers never go back to
//! the provider; every mutator issues exactly one remote call and, once it
//! succeeds, applies the same change to the snapshot.

use chrono::{DateTime, Utc};
use core_runtime::logging::redact_if_sensitive;
use serde_json::json;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::client::RequestOptions;
use crate::context::DriveContext;
use crate::error::{ReDriveError, Result};
use crate::folder::FolderHandle;
use crate::permission::{Access, Permission};
use crate::schema::{is_convertible, LogicalField, TrashStrategy};
use crate::types::{Blob, FileRecord, Resource};
use crate::user::UserHandle;

/// Name and destination of a copy.
///
/// Each variant corresponds to one `makeCopy` overload.
#[derive(Debug, Clone, Copy)]
pub enum CopyTarget<'a> {
    /// Same name, same parents
    InPlace,
    /// New name, same parents
    Named(&'a str),
    /// Same name, parent replaced by the folder
    Into(&'a FolderHandle),
    /// New name inside the folder
    NamedInto(&'a str, &'a FolderHandle),
}

/// A Drive file
#[derive(Clone)]
pub struct FileHandle {
    ctx: Arc<DriveContext>,
    record: FileRecord,
}

impl fmt::Debug for FileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileHandle")
            .field("record", &self.record)
            .finish_non_exhaustive()
    }
}

impl FileHandle {
    pub(crate) fn from_resource(ctx: Arc<DriveContext>, resource: &Resource) -> Result<Self> {
        let record = FileRecord::from_resource(resource, &ctx.schema)?;
        Ok(Self { ctx, record })
    }

    /// The cached snapshot
    pub fn record(&self) -> &FileRecord {
        &self.record
    }

    pub fn get_id(&self) -> &str {
        &self.record.id
    }

    pub fn get_name(&self) -> &str {
        &self.record.name
    }

    pub fn get_description(&self) -> Option<&str> {
        self.record.description.as_deref()
    }

    pub fn get_url(&self) -> Option<&str> {
        self.record.url.as_deref()
    }

    pub fn get_content_type(&self) -> &str {
        &self.record.mime_type
    }

    /// Stored bytes; `None` for Google-native documents, which have no size
    pub fn get_size(&self) -> Option<u64> {
        self.record.size
    }

    pub fn get_date_created(&self) -> Option<DateTime<Utc>> {
        self.record.created_at
    }

    pub fn get_last_updated(&self) -> Option<DateTime<Utc>> {
        self.record.modified_at
    }

    pub fn get_parent_ids(&self) -> &[String] {
        &self.record.parents
    }

    pub fn is_trashed(&self) -> bool {
        self.record.trashed
    }

    /// First listed owner.
    ///
    /// # Errors
    ///
    /// [`ReDriveError::NoOwnerPresent`] when the snapshot lists no owners,
    /// which is normal for shared-drive items.
    pub fn get_owner(&self) -> Result<UserHandle> {
        self.record
            .owners
            .first()
            .cloned()
            .map(UserHandle::new)
            .ok_or_else(|| ReDriveError::NoOwnerPresent {
                file_id: self.record.id.clone(),
            })
    }

    pub fn get_owners(&self) -> Vec<UserHandle> {
        self.record
            .owners
            .iter()
            .cloned()
            .map(UserHandle::new)
            .collect()
    }

    /// Content converted to `mime_type` by the provider.
    ///
    /// Only Google-native documents can be exported; anything else fails
    /// before a request is made.
    ///
    /// # Errors
    ///
    /// - [`ReDriveError::UnsupportedConversion`] for non-native sources
    /// - [`ReDriveError::RemoteApiError`] for a non-success export response
    #[instrument(skip(self), fields(file_id = %self.record.id))]
    pub async fn export_as(&self, mime_type: &str) -> Result<Blob> {
        if !is_convertible(&self.record.mime_type) {
            return Err(ReDriveError::UnsupportedConversion {
                mime_type: self.record.mime_type.clone(),
            });
        }

        let url = self
            .ctx
            .schema
            .export_url(&self.ctx.api_base_url, &self.record.id, mime_type);
        let response = self.ctx.client.fetch(&url).await?;

        if !response.is_success() {
            return Err(ReDriveError::RemoteApiError {
                status_code: response.status_code,
                body: String::from_utf8_lossy(&response.body).to_string(),
            });
        }

        info!(bytes = response.body.len(), "Exported file");
        Ok(Blob::new(response.body, mime_type).with_name(self.record.name.clone()))
    }

    /// Alias of [`export_as`](Self::export_as)
    pub async fn get_as(&self, mime_type: &str) -> Result<Blob> {
        self.export_as(mime_type).await
    }

    /// Copy the file, returning a handle to the new resource.
    ///
    /// The file is re-fetched first so the copy never carries a stale name or
    /// parent set from this handle's snapshot.
    #[instrument(skip(self, target), fields(file_id = %self.record.id))]
    pub async fn make_copy(&self, target: CopyTarget<'_>) -> Result<FileHandle> {
        let current = self.ctx.client.get(&self.record.id).await?;
        let current = FileRecord::from_resource(&current, &self.ctx.schema)?;

        let (name, parents) = match target {
            CopyTarget::InPlace => (current.name, current.parents),
            CopyTarget::Named(name) => (name.to_string(), current.parents),
            CopyTarget::Into(folder) => (current.name, vec![folder.get_id().to_string()]),
            CopyTarget::NamedInto(name, folder) => {
                (name.to_string(), vec![folder.get_id().to_string()])
            }
        };
        debug!(name = %name, parents = ?parents, "Resolved copy target");

        let schema = &self.ctx.schema;
        let metadata = schema.metadata(&[
            (LogicalField::Name, json!(name)),
            (LogicalField::Parents, schema.parent_refs(&parents)),
        ]);

        let copied = self.ctx.client.copy(metadata, &self.record.id).await?;
        let handle = FileHandle::from_resource(Arc::clone(&self.ctx), &copied)?;

        info!(copy_id = %handle.get_id(), "Copied file");
        Ok(handle)
    }

    #[instrument(skip(self, name), fields(file_id = %self.record.id))]
    pub async fn set_name(&mut self, name: &str) -> Result<&mut Self> {
        self.update_field(LogicalField::Name, name).await?;
        self.record.name = name.to_string();
        Ok(self)
    }

    #[instrument(skip(self, description), fields(file_id = %self.record.id))]
    pub async fn set_description(&mut self, description: &str) -> Result<&mut Self> {
        self.update_field(LogicalField::Description, description)
            .await?;
        self.record.description = Some(description.to_string());
        Ok(self)
    }

    async fn update_field(&self, field: LogicalField, value: &str) -> Result<()> {
        let fields = self.ctx.schema.metadata(&[(field, json!(value))]);
        self.ctx
            .client
            .update(fields, &self.record.id, RequestOptions::default())
            .await?;
        info!(field = self.ctx.schema.field_name(field), "Updated file metadata");
        Ok(())
    }

    /// Move the file into or out of the trash.
    #[instrument(skip(self), fields(file_id = %self.record.id))]
    pub async fn set_trashed(&mut self, trashed: bool) -> Result<&mut Self> {
        let options = RequestOptions::all_drives();
        let client = &self.ctx.client;

        match self.ctx.schema.trash_strategy() {
            TrashStrategy::DedicatedEndpoint if trashed => {
                client.trash(&self.record.id, options).await?;
            }
            TrashStrategy::DedicatedEndpoint => {
                client.untrash(&self.record.id, options).await?;
            }
            TrashStrategy::MetadataUpdate => {
                let fields = self
                    .ctx
                    .schema
                    .metadata(&[(LogicalField::Trashed, json!(trashed))]);
                client.update(fields, &self.record.id, options).await?;
            }
        }

        self.record.trashed = trashed;
        info!("File {}", if trashed { "trashed" } else { "restored" });
        Ok(self)
    }

    /// Grant `email` read access.
    #[instrument(skip(self, email), fields(file_id = %self.record.id))]
    pub async fn add_viewer(&self, email: &str) -> Result<&Self> {
        let resource = self.ctx.permissions.viewer(email);
        self.ctx
            .client
            .create_permission(&resource, &self.record.id)
            .await?;

        info!(
            viewer = %redact_if_sensitive("email", email),
            "Added viewer"
        );
        Ok(self)
    }

    /// Share the file with `access` at level `permission`.
    ///
    /// `(Anyone, None)` is accepted and grants nothing, so no request is made.
    ///
    /// # Errors
    ///
    /// - [`ReDriveError::UnsupportedPermission`] for organizer levels
    /// - [`ReDriveError::InvalidPermissionCombination`] for `None` with any
    ///   access other than `Anyone`
    #[instrument(skip(self), fields(file_id = %self.record.id))]
    pub async fn set_sharing(&self, access: Access, permission: Permission) -> Result<&Self> {
        if self.ctx.permissions.role(access, permission)?.is_none() {
            debug!("Sharing request grants nothing; skipping");
            return Ok(self);
        }

        // Only owner-scoped grants need the session's address
        let owner_email = if access.scoped_to_owner() {
            self.ctx.effective_user_email().await?
        } else {
            String::new()
        };
        let Some(resource) = self
            .ctx
            .permissions
            .build(access, permission, &owner_email)?
        else {
            return Ok(self);
        };

        self.ctx
            .client
            .create_permission(&resource, &self.record.id)
            .await?;

        info!(%access, %permission, "Updated sharing");
        Ok(self)
    }
}
