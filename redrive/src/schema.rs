//! Drive v2/v3 schema dialects
//!
//! The two API versions describe the same file resource with different field
//! names and shapes. Every version-conditional detail of the crate lives here
//! so handles ask one question ("what is this field called?") instead of
//! branching on the version themselves.
//!
//! See:
//!   v2: https://developers.google.com/drive/api/v2/reference/files
//!   v3: https://developers.google.com/drive/api/v3/reference/files

use core_runtime::ApiVersion;
use serde_json::{json, Map, Value};

use crate::error::{ReDriveError, Result};

/// MIME type the provider uses to mark folders
pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";
pub const GOOGLE_DOCUMENT: &str = "application/vnd.google-apps.document";
pub const GOOGLE_DRAWING: &str = "application/vnd.google-apps.drawing";
pub const GOOGLE_PRESENTATION: &str = "application/vnd.google-apps.presentation";
pub const GOOGLE_SPREADSHEET: &str = "application/vnd.google-apps.spreadsheet";
pub const PLAIN_TEXT: &str = "text/plain";

const CONVERTIBLE_MIME_TYPES: [&str; 4] = [
    GOOGLE_DOCUMENT,
    GOOGLE_DRAWING,
    GOOGLE_PRESENTATION,
    GOOGLE_SPREADSHEET,
];

const PARENT_REFERENCE_KIND: &str = "drive#parentReference";

/// Whether the provider can export `mime_type` to another format.
///
/// Only native Google Workspace documents qualify; conversion between two
/// binary formats (png -> jpg) is never attempted.
pub fn is_convertible(mime_type: &str) -> bool {
    CONVERTIBLE_MIME_TYPES.contains(&mime_type)
}

/// Logical resource fields, independent of the wire dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalField {
    Id,
    Name,
    MimeType,
    Description,
    CreatedTime,
    ModifiedTime,
    Size,
    Url,
    Owners,
    /// Relative to an entry of `Owners`
    OwnerName,
    /// Relative to an entry of `Owners`
    OwnerEmail,
    /// Relative to an entry of `Owners`
    OwnerPhoto,
    Parents,
    Trashed,
}

impl LogicalField {
    pub const ALL: [LogicalField; 14] = [
        LogicalField::Id,
        LogicalField::Name,
        LogicalField::MimeType,
        LogicalField::Description,
        LogicalField::CreatedTime,
        LogicalField::ModifiedTime,
        LogicalField::Size,
        LogicalField::Url,
        LogicalField::Owners,
        LogicalField::OwnerName,
        LogicalField::OwnerEmail,
        LogicalField::OwnerPhoto,
        LogicalField::Parents,
        LogicalField::Trashed,
    ];
}

/// How a dialect moves a file in and out of the trash
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrashStrategy {
    /// Dedicated `trash` / `untrash` calls (v2)
    DedicatedEndpoint,
    /// Metadata update carrying the `trashed` flag (v3)
    MetadataUpdate,
}

/// Wire name of `field` in the given dialect.
///
/// Dotted names (`picture.url`) denote nested objects.
pub fn field_name(field: LogicalField, version: ApiVersion) -> &'static str {
    use LogicalField::*;

    match (field, version) {
        (Id, _) => "id",
        (MimeType, _) => "mimeType",
        (Description, _) => "description",
        (Owners, _) => "owners",
        (OwnerName, _) => "displayName",
        (OwnerEmail, _) => "emailAddress",
        (Parents, _) => "parents",

        (Name, ApiVersion::V2) => "title",
        (Name, ApiVersion::V3) => "name",
        (CreatedTime, ApiVersion::V2) => "createdDate",
        (CreatedTime, ApiVersion::V3) => "createdTime",
        (ModifiedTime, ApiVersion::V2) => "modifiedDate",
        (ModifiedTime, ApiVersion::V3) => "modifiedTime",
        (Size, ApiVersion::V2) => "fileSize",
        (Size, ApiVersion::V3) => "size",
        (Url, ApiVersion::V2) => "alternateLink",
        (Url, ApiVersion::V3) => "webViewLink",
        (OwnerPhoto, ApiVersion::V2) => "picture.url",
        (OwnerPhoto, ApiVersion::V3) => "photoLink",
        (Trashed, ApiVersion::V2) => "labels.trashed",
        (Trashed, ApiVersion::V3) => "trashed",
    }
}

const V3_RESOURCE_FIELDS: &str = "kind,id,name,mimeType,description,createdTime,\
modifiedTime,size,webViewLink,owners,parents,trashed";

const V3_LIST_FIELDS: &str = "nextPageToken,files(kind,id,name,mimeType,description,\
createdTime,modifiedTime,size,webViewLink,owners,parents,trashed)";

/// Field mapping and request shaping for one dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaAdapter {
    version: ApiVersion,
}

impl SchemaAdapter {
    pub fn new(version: ApiVersion) -> Self {
        Self { version }
    }

    /// Adapter for a raw version number.
    ///
    /// # Errors
    ///
    /// [`ReDriveError::UnsupportedVersion`] for anything but 2 or 3.
    pub fn from_version_number(version: u8) -> Result<Self> {
        ApiVersion::try_from(version)
            .map(Self::new)
            .map_err(|_| ReDriveError::UnsupportedVersion(version))
    }

    pub fn version(&self) -> ApiVersion {
        self.version
    }

    pub fn field_name(&self, field: LogicalField) -> &'static str {
        field_name(field, self.version)
    }

    /// Value of `field` inside `resource`, following dotted paths.
    pub fn lookup<'a>(&self, resource: &'a Value, field: LogicalField) -> Option<&'a Value> {
        self.field_name(field)
            .split('.')
            .try_fold(resource, |node, key| node.get(key))
            .filter(|value| !value.is_null())
    }

    /// String value of `field`; numbers are rendered as text.
    pub fn string_field(&self, resource: &Value, field: LogicalField) -> Option<String> {
        match self.lookup(resource, field)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Build a metadata object keyed by this dialect's wire names.
    pub fn metadata(&self, fields: &[(LogicalField, Value)]) -> Value {
        let mut root = Map::new();
        for (field, value) in fields {
            insert_path(&mut root, self.field_name(*field), value.clone());
        }
        Value::Object(root)
    }

    /// Parent references in this dialect's shape.
    ///
    /// v2 wraps each id in a `drive#parentReference` object; v3 sends bare ids.
    pub fn parent_refs(&self, parent_ids: &[String]) -> Value {
        let refs = parent_ids.iter().map(|id| match self.version {
            ApiVersion::V2 => json!({ "kind": PARENT_REFERENCE_KIND, "id": id }),
            ApiVersion::V3 => json!(id),
        });
        Value::Array(refs.collect())
    }

    /// Parent ids of `resource`, accepting either reference shape.
    pub fn parent_ids(&self, resource: &Value) -> Vec<String> {
        let Some(Value::Array(parents)) = self.lookup(resource, LogicalField::Parents) else {
            return Vec::new();
        };

        parents
            .iter()
            .filter_map(|parent| match parent {
                Value::String(id) => Some(id.clone()),
                Value::Object(obj) => obj.get("id").and_then(Value::as_str).map(str::to_string),
                _ => None,
            })
            .collect()
    }

    pub fn trash_strategy(&self) -> TrashStrategy {
        match self.version {
            ApiVersion::V2 => TrashStrategy::DedicatedEndpoint,
            ApiVersion::V3 => TrashStrategy::MetadataUpdate,
        }
    }

    /// Whether file and folder creation is implemented for this dialect.
    ///
    /// v3 creation has never been wired up; callers get
    /// [`ReDriveError::UnsupportedInVersion`] instead of a guessed request.
    pub fn supports_create(&self) -> bool {
        self.version == ApiVersion::V2
    }

    /// Path segment between the API root and `/files`
    pub fn api_path(&self) -> &'static str {
        match self.version {
            ApiVersion::V2 => "drive/v2",
            ApiVersion::V3 => "drive/v3",
        }
    }

    /// Key of the resource array in a files.list response
    pub fn list_items_field(&self) -> &'static str {
        match self.version {
            ApiVersion::V2 => "items",
            ApiVersion::V3 => "files",
        }
    }

    /// Query parameter capping the page size of files.list
    pub fn page_size_param(&self) -> &'static str {
        match self.version {
            ApiVersion::V2 => "maxResults",
            ApiVersion::V3 => "pageSize",
        }
    }

    /// `fields` selector for single-resource responses.
    ///
    /// v3 answers with `id,name,mimeType,kind` unless fields are requested;
    /// v2 returns the full resource by default.
    pub fn resource_fields(&self) -> Option<&'static str> {
        match self.version {
            ApiVersion::V2 => None,
            ApiVersion::V3 => Some(V3_RESOURCE_FIELDS),
        }
    }

    /// `fields` selector for files.list responses
    pub fn list_fields(&self) -> Option<&'static str> {
        match self.version {
            ApiVersion::V2 => None,
            ApiVersion::V3 => Some(V3_LIST_FIELDS),
        }
    }

    /// Search expression matching non-trashed resources named exactly `name`.
    pub fn name_query(&self, name: &str, mime_type: Option<&str>) -> String {
        let mut clauses = vec![format!(
            "{} = '{}'",
            self.field_name(LogicalField::Name),
            escape_query_literal(name)
        )];
        if let Some(mime_type) = mime_type {
            clauses.push(format!("mimeType = '{}'", escape_query_literal(mime_type)));
        }
        clauses.push("trashed = false".to_string());
        clauses.join(" and ")
    }

    /// Export endpoint for `file_id` converted to `mime_type`.
    pub fn export_url(&self, api_base_url: &str, file_id: &str, mime_type: &str) -> String {
        format!(
            "{}/{}/files/{}/export?mimeType={}",
            api_base_url,
            self.api_path(),
            urlencoding::encode(file_id),
            urlencoding::encode(mime_type)
        )
    }
}

fn insert_path(root: &mut Map<String, Value>, path: &str, value: Value) {
    match path.split_once('.') {
        None => {
            root.insert(path.to_string(), value);
        }
        Some((head, rest)) => {
            let child = root
                .entry(head.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !child.is_object() {
                *child = Value::Object(Map::new());
            }
            if let Value::Object(child) = child {
                insert_path(child, rest, value);
            }
        }
    }
}

fn escape_query_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}
