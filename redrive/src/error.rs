//! Error types for ReDrive operations

use core_runtime::ApiVersion;
use thiserror::Error;

use crate::permission::{Access, Permission};

/// ReDrive errors
///
/// Every variant is terminal: nothing in the crate retries or degrades to an
/// approximate result.
#[derive(Error, Debug)]
pub enum ReDriveError {
    /// No API version was configured before use
    #[error("Drive API version not set; configure it before any other operation")]
    VersionNotConfigured,

    /// Configured API version is not 2 or 3
    #[error("Unsupported Drive API version: {0}")]
    InvalidVersion(u8),

    /// No schema dialect exists for this version number
    #[error("No schema dialect for Drive API version {0}")]
    UnsupportedVersion(u8),

    /// Operation not implemented for the active schema version
    #[error("{operation} is not supported for Drive API {version}")]
    UnsupportedInVersion {
        operation: &'static str,
        version: ApiVersion,
    },

    /// Export requested for a type the provider cannot convert
    #[error("Export is only supported for Google Workspace types, not {mime_type}")]
    UnsupportedConversion { mime_type: String },

    /// Permission level not valid with the requested access scope
    #[error("Permission {permission} cannot be combined with access {access}")]
    InvalidPermissionCombination {
        access: Access,
        permission: Permission,
    },

    /// Permission level the provider refuses for files
    #[error("Permission {0} is not supported")]
    UnsupportedPermission(Permission),

    /// API request returned a non-success status
    #[error("Google Drive API error (status {status_code}): {body}")]
    RemoteApiError { status_code: u16, body: String },

    /// Resource snapshot carries no owners
    #[error("File {file_id} has no owner")]
    NoOwnerPresent { file_id: String },

    /// Resource lacks a field the handle cannot work without
    #[error("Drive resource is missing required field '{field}'")]
    MissingField { field: &'static str },

    /// Failed to parse API response or caller-supplied token
    #[error("Failed to parse: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport or session failure
    #[error(transparent)]
    Bridge(#[from] bridge_traits::error::BridgeError),
}

/// Result type for ReDrive operations
pub type Result<T> = std::result::Result<T, ReDriveError>;

impl From<core_runtime::Error> for ReDriveError {
    fn from(error: core_runtime::Error) -> Self {
        match error {
            core_runtime::Error::VersionNotConfigured => ReDriveError::VersionNotConfigured,
            core_runtime::Error::InvalidVersion(version) => ReDriveError::InvalidVersion(version),
            other => ReDriveError::Config(other.to_string()),
        }
    }
}
