//! The fixed role to permission table

use super::types::{PermissionKind, Resource, Role};

/// Whether `role` grants `kind` access to `resource`
pub const fn grants(role: Role, resource: Resource, kind: PermissionKind) -> bool {
    use PermissionKind::{Delete, Read, Write};
    use Resource::*;

    match role {
        Role::Admin => true,
        Role::Owner => !matches!((resource, kind), (Users, Delete)),
        Role::Employee => match resource {
            Dashboard | Settings => matches!(kind, Read),
            Customers | Inventory | Tasks | Notifications => matches!(kind, Read | Write),
            Appointments => true,
            Finances | Marketing | Loyalty | SocialMedia | Users => false,
        },
        Role::SocialManager => match resource {
            Dashboard | Customers | Loyalty | Settings => matches!(kind, Read),
            Notifications => matches!(kind, Read | Write),
            Marketing | SocialMedia => true,
            Appointments | Inventory | Finances | Tasks | Users => false,
        },
    }
}

/// Held roles that grant the permission, in the order they were given
pub fn granting_roles(roles: &[Role], resource: Resource, kind: PermissionKind) -> Vec<Role> {
    roles
        .iter()
        .copied()
        .filter(|role| grants(*role, resource, kind))
        .collect()
}
