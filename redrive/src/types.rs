//! Resource snapshots and content blobs
//!
//! Remote resources arrive as JSON in whichever dialect the entry point was
//! configured for. [`FileRecord::from_resource`] reads them through the
//! [`SchemaAdapter`] so nothing downstream knows which dialect was used.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::{ReDriveError, Result};
use crate::permission::email_domain;
use crate::schema::{LogicalField, SchemaAdapter, FOLDER_MIME_TYPE};

/// The provider's JSON representation of a file or folder
pub type Resource = Value;

/// One page of a files.list response
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceList {
    pub items: Vec<Resource>,
    pub next_page_token: Option<String>,
}

/// Raw result of an authenticated fetch; the status is not interpreted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status_code: u16,
    pub body: Bytes,
}

impl FetchResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// Owner metadata embedded in a file resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerInfo {
    name: Option<String>,
    email: Option<String>,
    domain: Option<String>,
    photo_url: Option<String>,
}

impl OwnerInfo {
    pub fn new(
        name: Option<String>,
        email: Option<String>,
        photo_url: Option<String>,
    ) -> Self {
        let domain = email
            .as_deref()
            .and_then(email_domain)
            .map(str::to_string);

        Self {
            name,
            email,
            domain,
            photo_url,
        }
    }

    fn from_resource(owner: &Value, schema: &SchemaAdapter) -> Self {
        Self::new(
            schema.string_field(owner, LogicalField::OwnerName),
            schema.string_field(owner, LogicalField::OwnerEmail),
            schema.string_field(owner, LogicalField::OwnerPhoto),
        )
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Derived from the e-mail address; the API does not report it
    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    pub fn photo_url(&self) -> Option<&str> {
        self.photo_url.as_deref()
    }
}

/// Canonical snapshot of a remote file or folder.
///
/// Only `id` is guaranteed current; everything else reflects the remote
/// state at fetch time plus any local mutations made through the handle.
#[derive(Debug, Clone, PartialEq)]
pub struct FileRecord {
    pub id: String,
    pub name: String,
    pub mime_type: String,
    pub description: Option<String>,
    pub size: Option<u64>,
    pub created_at: Option<DateTime<Utc>>,
    pub modified_at: Option<DateTime<Utc>>,
    pub owners: Vec<OwnerInfo>,
    pub parents: Vec<String>,
    pub url: Option<String>,
    pub trashed: bool,
}

impl FileRecord {
    /// Read a resource in the adapter's dialect.
    ///
    /// # Errors
    ///
    /// [`ReDriveError::MissingField`] without an `id`;
    /// [`ReDriveError::ParseError`] for malformed sizes or timestamps.
    pub fn from_resource(resource: &Resource, schema: &SchemaAdapter) -> Result<Self> {
        let id = schema
            .string_field(resource, LogicalField::Id)
            .ok_or(ReDriveError::MissingField { field: "id" })?;

        let size = schema
            .string_field(resource, LogicalField::Size)
            .map(|raw| {
                raw.parse::<u64>()
                    .map_err(|e| ReDriveError::ParseError(format!("invalid size '{}': {}", raw, e)))
            })
            .transpose()?;

        let owners = match schema.lookup(resource, LogicalField::Owners) {
            Some(Value::Array(owners)) => owners
                .iter()
                .map(|owner| OwnerInfo::from_resource(owner, schema))
                .collect(),
            _ => Vec::new(),
        };

        let trashed = schema
            .lookup(resource, LogicalField::Trashed)
            .and_then(Value::as_bool)
            .unwrap_or(false);

        Ok(Self {
            name: schema
                .string_field(resource, LogicalField::Name)
                .unwrap_or_default(),
            mime_type: schema
                .string_field(resource, LogicalField::MimeType)
                .unwrap_or_default(),
            description: schema.string_field(resource, LogicalField::Description),
            size,
            created_at: parse_timestamp(schema, resource, LogicalField::CreatedTime)?,
            modified_at: parse_timestamp(schema, resource, LogicalField::ModifiedTime)?,
            owners,
            parents: schema.parent_ids(resource),
            url: schema.string_field(resource, LogicalField::Url),
            trashed,
            id,
        })
    }

    pub fn is_folder(&self) -> bool {
        self.mime_type == FOLDER_MIME_TYPE
    }
}

fn parse_timestamp(
    schema: &SchemaAdapter,
    resource: &Resource,
    field: LogicalField,
) -> Result<Option<DateTime<Utc>>> {
    schema
        .string_field(resource, field)
        .map(|raw| {
            DateTime::parse_from_rfc3339(&raw)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| ReDriveError::ParseError(format!("invalid timestamp '{}': {}", raw, e)))
        })
        .transpose()
}

/// File content together with its type and an optional name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    name: Option<String>,
    content_type: String,
    data: Bytes,
}

impl Blob {
    pub fn new(data: impl Into<Bytes>, content_type: impl Into<String>) -> Self {
        Self {
            name: None,
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    /// UTF-8 text content
    pub fn from_text(text: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self::new(Bytes::from(text.into()), content_type)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn bytes(&self) -> &Bytes {
        &self.data
    }

    /// Content decoded as UTF-8, replacing invalid sequences
    pub fn data_as_string(&self) -> String {
        String::from_utf8_lossy(&self.data).to_string()
    }
}
