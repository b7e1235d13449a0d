//! Sidebar and mobile drawer of the dashboard

use super::routes::normalize;
use crate::auth::rbac::{EffectivePermissions, PermissionKind, Resource};
use crate::guard::DASHBOARD_ROUTE;
use serde::Serialize;

/// One sidebar entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
    /// Shown only to users who can read this
    pub resource: Resource,
}

const fn item(label: &'static str, path: &'static str, resource: Resource) -> NavItem {
    NavItem {
        label,
        path,
        resource,
    }
}

/// Sidebar entries in display order
pub const SIDEBAR: &[NavItem] = &[
    item("Dashboard", DASHBOARD_ROUTE, Resource::Dashboard),
    item("Customers", "/customers", Resource::Customers),
    item("Appointments", "/appointments", Resource::Appointments),
    item("Calendar", "/calendar", Resource::Appointments),
    item("Inventory", "/inventory", Resource::Inventory),
    item("Finances", "/finances", Resource::Finances),
    item("Tasks", "/tasks", Resource::Tasks),
    item("Marketing", "/marketing", Resource::Marketing),
    item("Loyalty", "/loyalty", Resource::Loyalty),
    item("Social media", "/social-media", Resource::SocialMedia),
    item("Notifications", "/notifications", Resource::Notifications),
    item("Settings", "/settings", Resource::Settings),
];

impl NavItem {
    /// The dashboard entry is active only on its own path, every other entry
    /// also on the paths below it
    pub fn is_active(&self, location: &str) -> bool {
        let path = normalize(location);
        if self.path == DASHBOARD_ROUTE {
            return path == DASHBOARD_ROUTE;
        }
        path == self.path
            || path
                .strip_prefix(self.path)
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

/// Rendered sidebar entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShellItem {
    #[serde(flatten)]
    pub item: NavItem,
    pub active: bool,
}

/// Layout state around every protected screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationShell {
    items: Vec<NavItem>,
    location: String,
    drawer_open: bool,
}

impl NavigationShell {
    /// Sidebar restricted to what `permissions` may read
    pub fn new(permissions: &EffectivePermissions, location: &str) -> Self {
        let items = SIDEBAR
            .iter()
            .filter(|item| permissions.allows(item.resource, PermissionKind::Read))
            .copied()
            .collect();
        Self {
            items,
            location: normalize(location),
            drawer_open: false,
        }
    }

    pub fn items(&self) -> &[NavItem] {
        &self.items
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Entries with their highlight flag
    pub fn view(&self) -> Vec<ShellItem> {
        self.items
            .iter()
            .map(|item| ShellItem {
                item: *item,
                active: item.is_active(&self.location),
            })
            .collect()
    }

    pub fn active_item(&self) -> Option<&NavItem> {
        self.items.iter().find(|item| item.is_active(&self.location))
    }

    pub fn is_drawer_open(&self) -> bool {
        self.drawer_open
    }

    pub fn open_drawer(&mut self) {
        self.drawer_open = true;
    }

    pub fn close_drawer(&mut self) {
        self.drawer_open = false;
    }

    pub fn toggle_drawer(&mut self) {
        self.drawer_open = !self.drawer_open;
    }

    /// Follow a link; the mobile drawer closes
    pub fn navigate(&mut self, location: &str) {
        self.location = normalize(location);
        self.drawer_open = false;
    }
}
