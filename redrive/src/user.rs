//! Owner view of a file

use crate::types::OwnerInfo;

/// A user as embedded in a file's owner list.
///
/// Purely local: no remote identity and no remote calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserHandle {
    info: OwnerInfo,
}

impl UserHandle {
    pub fn new(info: OwnerInfo) -> Self {
        Self { info }
    }

    pub fn get_name(&self) -> Option<&str> {
        self.info.name()
    }

    pub fn get_email(&self) -> Option<&str> {
        self.info.email()
    }

    pub fn get_domain(&self) -> Option<&str> {
        self.info.domain()
    }

    pub fn get_photo_url(&self) -> Option<&str> {
        self.info.photo_url()
    }
}

impl From<OwnerInfo> for UserHandle {
    fn from(info: OwnerInfo) -> Self {
        Self::new(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let user = UserHandle::new(OwnerInfo::new(
            Some("Dave Abouav".to_string()),
            Some("dave@gleeda.net".to_string()),
            None,
        ));

        assert_eq!(user.get_name(), Some("Dave Abouav"));
        assert_eq!(user.get_email(), Some("dave@gleeda.net"));
        assert_eq!(user.get_domain(), Some("gleeda.net"));
        assert_eq!(user.get_photo_url(), None);
    }

    #[test]
    fn test_missing_email_has_no_domain() {
        let user: UserHandle = OwnerInfo::new(Some("Shared drive".to_string()), None, None).into();
        assert_eq!(user.get_domain(), None);
    }
}
