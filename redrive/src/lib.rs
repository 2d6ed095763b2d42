//! # ReDrive
//!
//! DriveApp-style file, folder and user handles over the Google Drive v2/v3
//! REST API, usable with the narrow `drive.file` OAuth scope.
//!
//! ## Overview
//!
//! This crate provides:
//! - [`ReDriveApp`]: entry point bound to one API version
//! - [`FileHandle`] / [`FolderHandle`] / [`UserHandle`]: cached snapshots with
//!   accessors and remote mutators
//! - [`SchemaAdapter`]: the v2/v3 field dialects
//! - [`PermissionBuilder`]: sharing requests per version
//! - [`RemoteResourceClient`]: the provider boundary, with the REST
//!   implementation [`DriveRestClient`]
//! - [`FileIterator`] / [`FolderIterator`]: lazy, resumable search results
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::StaticSession;
//! use core_runtime::DriveConfig;
//! use redrive::{Access, Permission, ReDriveApp};
//! use std::sync::Arc;
//!
//! let config = DriveConfig::builder()
//!     .api_version(2)
//!     .session(Arc::new(StaticSession::from_env()?))
//!     .build()?;
//! let app = ReDriveApp::new(config);
//!
//! let mut file = app.get_file_by_id("1WkMoywAyqJMPuMg8F3xgbUFuuY4ziH4UzgGs7vIvGGE").await?;
//! file.set_name("Quarterly report").await?;
//! file.set_sharing(Access::AnyoneWithLink, Permission::View).await?;
//! ```

pub mod app;
pub mod client;
mod context;
pub mod error;
pub mod file;
pub mod folder;
pub mod iterator;
pub mod permission;
pub mod schema;
pub mod types;
pub mod user;

pub use app::{CreateFile, ReDriveApp};
pub use client::{DriveRestClient, ListQuery, RemoteResourceClient, RequestOptions};
pub use error::{ReDriveError, Result};
pub use file::{CopyTarget, FileHandle};
pub use folder::FolderHandle;
pub use iterator::{FileIterator, FolderIterator};
pub use permission::{Access, Permission, PermissionBuilder, PermissionResource};
pub use schema::{LogicalField, SchemaAdapter};
pub use types::{Blob, FetchResponse, FileRecord, OwnerInfo, Resource, ResourceList};
pub use user::UserHandle;
