//! RBAC type definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Role held by a dashboard user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Owner,
    Employee,
    SocialManager,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Admin, Role::Owner, Role::Employee, Role::SocialManager];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Owner => "owner",
            Role::Employee => "employee",
            Role::SocialManager => "social_manager",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "owner" => Ok(Role::Owner),
            "employee" => Ok(Role::Employee),
            "social_manager" => Ok(Role::SocialManager),
            other => Err(format!("Invalid role: {}", other)),
        }
    }
}

/// Business area used as the unit of permission granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Dashboard,
    Customers,
    Appointments,
    Inventory,
    Finances,
    Tasks,
    Marketing,
    Loyalty,
    SocialMedia,
    Notifications,
    Settings,
    Users,
}

impl Resource {
    pub const ALL: [Resource; 12] = [
        Resource::Dashboard,
        Resource::Customers,
        Resource::Appointments,
        Resource::Inventory,
        Resource::Finances,
        Resource::Tasks,
        Resource::Marketing,
        Resource::Loyalty,
        Resource::SocialMedia,
        Resource::Notifications,
        Resource::Settings,
        Resource::Users,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Dashboard => "dashboard",
            Resource::Customers => "customers",
            Resource::Appointments => "appointments",
            Resource::Inventory => "inventory",
            Resource::Finances => "finances",
            Resource::Tasks => "tasks",
            Resource::Marketing => "marketing",
            Resource::Loyalty => "loyalty",
            Resource::SocialMedia => "social_media",
            Resource::Notifications => "notifications",
            Resource::Settings => "settings",
            Resource::Users => "users",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resource::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| format!("Invalid resource: {}", s))
    }
}

/// Kind of access requested on a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionKind {
    Read,
    Write,
    Delete,
}

impl PermissionKind {
    pub const ALL: [PermissionKind; 3] = [
        PermissionKind::Read,
        PermissionKind::Write,
        PermissionKind::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionKind::Read => "read",
            PermissionKind::Write => "write",
            PermissionKind::Delete => "delete",
        }
    }
}

impl fmt::Display for PermissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Permission check result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionCheck {
    /// Whether permission is granted
    pub granted: bool,
    /// Held roles that grant the permission
    pub granted_by: Vec<Role>,
    /// Reason for denial (if not granted)
    pub denial_reason: Option<String>,
}

impl PermissionCheck {
    pub(super) fn denied<S: Into<String>>(reason: S) -> Self {
        Self {
            granted: false,
            granted_by: Vec::new(),
            denial_reason: Some(reason.into()),
        }
    }
}

/// The roles held by one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleAssignment {
    pub user_id: Uuid,
    pub roles: Vec<Role>,
}

/// Read/write/delete flags of one resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceAccess {
    pub resource: Resource,
    pub read: bool,
    pub write: bool,
    pub delete: bool,
}

/// Everything a user may do, as resolved from their roles
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectivePermissions {
    pub user_id: Uuid,
    pub roles: Vec<Role>,
    pub resources: Vec<ResourceAccess>,
}

impl EffectivePermissions {
    pub fn allows(&self, resource: Resource, kind: PermissionKind) -> bool {
        self.resources
            .iter()
            .find(|access| access.resource == resource)
            .is_some_and(|access| match kind {
                PermissionKind::Read => access.read,
                PermissionKind::Write => access.write,
                PermissionKind::Delete => access.delete,
            })
    }
}
