//! Folder handle

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::Result;
use crate::file::FileHandle;
use crate::permission::{Access, Permission};

/// A Drive folder.
///
/// Holds no state of its own; every call goes to the wrapped [`FileHandle`].
#[derive(Debug, Clone)]
pub struct FolderHandle {
    file: FileHandle,
}

impl FolderHandle {
    pub(crate) fn from_file(file: FileHandle) -> Self {
        if !file.record().is_folder() {
            debug!(
                file_id = %file.get_id(),
                mime_type = %file.get_content_type(),
                "Wrapping non-folder resource as folder"
            );
        }
        Self { file }
    }

    pub fn get_id(&self) -> &str {
        self.file.get_id()
    }

    pub fn get_name(&self) -> &str {
        self.file.get_name()
    }

    pub fn get_description(&self) -> Option<&str> {
        self.file.get_description()
    }

    pub fn get_url(&self) -> Option<&str> {
        self.file.get_url()
    }

    pub fn get_date_created(&self) -> Option<DateTime<Utc>> {
        self.file.get_date_created()
    }

    pub fn get_last_updated(&self) -> Option<DateTime<Utc>> {
        self.file.get_last_updated()
    }

    pub fn is_trashed(&self) -> bool {
        self.file.is_trashed()
    }

    /// The underlying file view of this folder
    pub fn as_file(&self) -> &FileHandle {
        &self.file
    }

    pub async fn set_name(&mut self, name: &str) -> Result<&mut Self> {
        self.file.set_name(name).await?;
        Ok(self)
    }

    pub async fn set_trashed(&mut self, trashed: bool) -> Result<&mut Self> {
        self.file.set_trashed(trashed).await?;
        Ok(self)
    }

    pub async fn set_sharing(&self, access: Access, permission: Permission) -> Result<&Self> {
        self.file.set_sharing(access, permission).await?;
        Ok(self)
    }
}

impl From<FolderHandle> for FileHandle {
    fn from(folder: FolderHandle) -> Self {
        folder.file
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::testing::{context, MockRemote};
    use crate::schema::FOLDER_MIME_TYPE;
    use core_runtime::ApiVersion;
    use serde_json::json;

    fn folder(version: ApiVersion, remote: MockRemote) -> FolderHandle {
        let resource = json!({
            "id": "folder1",
            "title": "Reports",
            "name": "Reports",
            "mimeType": FOLDER_MIME_TYPE,
            "labels": { "trashed": false }
        });
        FolderHandle::from_file(
            FileHandle::from_resource(context(version, remote), &resource).unwrap(),
        )
    }

    #[test]
    fn test_delegates_readers() {
        let folder = folder(ApiVersion::V2, MockRemote::new());

        assert_eq!(folder.get_id(), "folder1");
        assert_eq!(folder.get_name(), "Reports");
        assert!(folder.as_file().record().is_folder());
        assert!(!folder.is_trashed());
    }

    #[tokio::test]
    async fn test_set_trashed_forwards_to_file() {
        let mut remote = MockRemote::new();
        remote
            .expect_trash()
            .times(1)
            .withf(|id, _| id == "folder1")
            .returning(|_, _| Ok(json!({ "id": "folder1" })));

        let mut folder = folder(ApiVersion::V2, remote);
        folder.set_trashed(true).await.unwrap();
        assert!(folder.is_trashed());
    }

    #[tokio::test]
    async fn test_set_name_forwards_to_file() {
        let mut remote = MockRemote::new();
        remote
            .expect_update()
            .times(1)
            .withf(|fields, id, _| id == "folder1" && fields["name"] == "Archive")
            .returning(|fields, _, _| Ok(fields));

        let mut folder = folder(ApiVersion::V3, remote);
        folder.set_name("Archive").await.unwrap();
        assert_eq!(folder.get_name(), "Archive");
    }
}
