//! Sharing permission requests
//!
//! Translates a DriveApp-style (access, permission) pair into the permission
//! resource each API version expects.

use core_runtime::ApiVersion;
use serde::Serialize;
use std::fmt;

use crate::error::{ReDriveError, Result};

const PERMISSION_KIND: &str = "drive#permission";

/// Who may access a shared resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    Anyone,
    AnyoneWithLink,
    Domain,
    DomainWithLink,
    Private,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Access::Anyone => "ANYONE",
            Access::AnyoneWithLink => "ANYONE_WITH_LINK",
            Access::Domain => "DOMAIN",
            Access::DomainWithLink => "DOMAIN_WITH_LINK",
            Access::Private => "PRIVATE",
        })
    }
}

impl Access {
    /// Whether the grant is derived from the effective user's address.
    pub fn scoped_to_owner(&self) -> bool {
        matches!(self, Access::Domain | Access::DomainWithLink | Access::Private)
    }
}

/// What an accessor may do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    View,
    Edit,
    Comment,
    Owner,
    Organizer,
    FileOrganizer,
    None,
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Permission::View => "VIEW",
            Permission::Edit => "EDIT",
            Permission::Comment => "COMMENT",
            Permission::Owner => "OWNER",
            Permission::Organizer => "ORGANIZER",
            Permission::FileOrganizer => "FILE_ORGANIZER",
            Permission::None => "NONE",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GranteeType {
    User,
    Domain,
    Anyone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Reader,
    Writer,
    Commenter,
    Owner,
}

/// Permission resource as sent to `permissions.insert` (v2) or
/// `permissions.create` (v3).
///
/// v2 identifies the grantee through `value` and link sharing through
/// `withLink`; v3 uses `emailAddress`/`domain` and `allowFileDiscovery`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionResource {
    pub kind: &'static str,
    #[serde(rename = "type")]
    pub grantee_type: GranteeType,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_link: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_file_discovery: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_roles: Option<Vec<Role>>,
}

impl PermissionResource {
    fn new(grantee_type: GranteeType, role: Role) -> Self {
        Self {
            kind: PERMISSION_KIND,
            grantee_type,
            role,
            value: None,
            email_address: None,
            domain: None,
            with_link: None,
            allow_file_discovery: None,
            additional_roles: None,
        }
    }
}

/// Builds version-specific permission resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermissionBuilder {
    version: ApiVersion,
}

impl PermissionBuilder {
    pub fn new(version: ApiVersion) -> Self {
        Self { version }
    }

    /// Reader grant for a single user.
    pub fn viewer(&self, email: &str) -> PermissionResource {
        let mut resource = PermissionResource::new(GranteeType::User, Role::Reader);
        self.set_user(&mut resource, email);
        resource
    }

    /// Role granted by `(access, permission)`, validated without a session.
    ///
    /// `Ok(None)` means the pair is valid but grants nothing. Errors match
    /// [`build`](Self::build).
    pub fn role(&self, access: Access, permission: Permission) -> Result<Option<Role>> {
        let role = match permission {
            Permission::View => Role::Reader,
            Permission::Edit => Role::Writer,
            Permission::Owner => Role::Owner,
            Permission::Comment => match self.version {
                ApiVersion::V2 => Role::Reader,
                ApiVersion::V3 => Role::Commenter,
            },
            Permission::Organizer | Permission::FileOrganizer => {
                return Err(ReDriveError::UnsupportedPermission(permission))
            }
            Permission::None if access == Access::Anyone => return Ok(None),
            Permission::None => {
                return Err(ReDriveError::InvalidPermissionCombination { access, permission })
            }
        };
        Ok(Some(role))
    }

    /// Resource for `setSharing(access, permission)`.
    ///
    /// `owner_email` is the effective user: `Private` grants go to them and
    /// the domain scopes use the part after `@`.
    ///
    /// Returns `Ok(None)` for `(Anyone, None)`: the pair is valid but grants
    /// nothing, so there is no resource to send.
    ///
    /// # Errors
    ///
    /// - [`ReDriveError::UnsupportedPermission`] for `Organizer` and
    ///   `FileOrganizer`, whatever the access
    /// - [`ReDriveError::InvalidPermissionCombination`] for `None` with any
    ///   access other than `Anyone`
    pub fn build(
        &self,
        access: Access,
        permission: Permission,
        owner_email: &str,
    ) -> Result<Option<PermissionResource>> {
        let Some(role) = self.role(access, permission)? else {
            return Ok(None);
        };

        let mut resource = match access {
            Access::Anyone | Access::AnyoneWithLink => {
                PermissionResource::new(GranteeType::Anyone, role)
            }
            Access::Domain | Access::DomainWithLink => {
                let domain = email_domain(owner_email).ok_or_else(|| {
                    ReDriveError::Config(format!(
                        "cannot derive a sharing domain from '{}'",
                        owner_email
                    ))
                })?;
                let mut resource = PermissionResource::new(GranteeType::Domain, role);
                match self.version {
                    ApiVersion::V2 => resource.value = Some(domain.to_string()),
                    ApiVersion::V3 => resource.domain = Some(domain.to_string()),
                }
                resource
            }
            Access::Private => {
                let mut resource = PermissionResource::new(GranteeType::User, role);
                self.set_user(&mut resource, owner_email);
                resource
            }
        };

        if access != Access::Private {
            let link_only = matches!(access, Access::AnyoneWithLink | Access::DomainWithLink);
            match self.version {
                ApiVersion::V2 => resource.with_link = Some(link_only),
                ApiVersion::V3 => resource.allow_file_discovery = Some(!link_only),
            }
        }

        if permission == Permission::Comment && self.version == ApiVersion::V2 {
            resource.additional_roles = Some(vec![Role::Commenter]);
        }

        Ok(Some(resource))
    }

    fn set_user(&self, resource: &mut PermissionResource, email: &str) {
        match self.version {
            ApiVersion::V2 => resource.value = Some(email.to_string()),
            ApiVersion::V3 => resource.email_address = Some(email.to_string()),
        }
    }
}

/// Part of an e-mail address after the `@`
pub(crate) fn email_domain(email: &str) -> Option<&str> {
    email
        .split_once('@')
        .map(|(_, domain)| domain)
        .filter(|domain| !domain.is_empty())
}
