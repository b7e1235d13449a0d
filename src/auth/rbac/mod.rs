//! Role-Based Access Control (RBAC)
//!
//! Roles and resources are closed enumerations and the grant table is a
//! constant function, so every permission decision is an exhaustive match.
//! A user may hold any number of roles; a permission is granted when any held
//! role grants it.

mod grants;
mod resolver;
mod store;
#[cfg(test)]
mod tests;
mod types;

pub use grants::{grants, granting_roles};
pub use resolver::PermissionResolver;
pub use store::{InMemoryRoleStore, RoleStore};
pub use types::{
    EffectivePermissions, PermissionCheck, PermissionKind, Resource, ResourceAccess, Role,
    RoleAssignment,
};
