//! The dashboard route table

use crate::auth::rbac::{PermissionKind, Resource, Role};
use crate::guard::{DASHBOARD_ROUTE, Guarded, PermissionGuard};
use serde::Serialize;

/// Every screen the dashboard can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Dashboard,
    Customers,
    CustomerForm,
    CustomerDetail,
    Appointments,
    Calendar,
    Inventory,
    Expenses,
    Revenues,
    Finances,
    Tasks,
    Marketing,
    Loyalty,
    SocialMedia,
    Notifications,
    Settings,
    UserManagement,
    Login,
    Register,
    ResetPassword,
    UpdatePassword,
    VerifyEmail,
    Booking,
    CancelAppointment,
    NotFound,
}

/// Who may open a route
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "access", rename_all = "snake_case")]
pub enum Access {
    Public,
    /// Signed-in users, optionally also holding a role and/or permission
    Protected {
        permission: Option<(Resource, PermissionKind)>,
        role: Option<Role>,
        fallback: &'static str,
    },
}

impl Access {
    /// Any signed-in user
    pub const fn signed_in() -> Self {
        Access::Protected {
            permission: None,
            role: None,
            fallback: DASHBOARD_ROUTE,
        }
    }

    pub const fn permission(resource: Resource, kind: PermissionKind) -> Self {
        Access::Protected {
            permission: Some((resource, kind)),
            role: None,
            fallback: DASHBOARD_ROUTE,
        }
    }

    pub const fn read(resource: Resource) -> Self {
        Self::permission(resource, PermissionKind::Read)
    }

    pub const fn role(role: Role, fallback: &'static str) -> Self {
        Access::Protected {
            permission: None,
            role: Some(role),
            fallback,
        }
    }

    pub fn is_public(&self) -> bool {
        matches!(self, Access::Public)
    }

    /// The permission guard this access needs, if any
    pub fn permission_guard(&self) -> Option<PermissionGuard> {
        let Access::Protected {
            permission,
            role,
            fallback,
        } = self
        else {
            return None;
        };

        let guard = match (role, permission) {
            (Some(role), Some((resource, kind))) => {
                PermissionGuard::role(*role).and_permission(*resource, *kind)
            }
            (Some(role), None) => PermissionGuard::role(*role),
            (None, Some((resource, kind))) => PermissionGuard::permission(*resource, *kind),
            (None, None) => return None,
        };
        Some(guard.with_fallback(*fallback))
    }

    /// Wrap `location` in the guards this access needs
    pub fn guarded(&self, location: &str) -> Guarded {
        let mut guarded = Guarded::new(location);
        if !self.is_public() {
            guarded = guarded.auth();
        }
        if let Some(guard) = self.permission_guard() {
            guarded = guarded.permission(guard);
        }
        guarded
    }
}

/// One entry of the route table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteSpec {
    /// Path pattern; a segment starting with `:` matches any single segment
    pub pattern: &'static str,
    pub screen: Screen,
    #[serde(flatten)]
    pub access: Access,
}

impl RouteSpec {
    const fn new(pattern: &'static str, screen: Screen, access: Access) -> Self {
        Self {
            pattern,
            screen,
            access,
        }
    }

    fn has_param(&self) -> bool {
        self.pattern.contains("/:")
    }

    /// Match a normalized path, returning the parameter segment when the
    /// pattern has one
    fn matches(&self, path: &str) -> Option<Option<String>> {
        let mut pattern = self.pattern.split('/');
        let mut segments = path.split('/');
        let mut param = None;
        loop {
            match (pattern.next(), segments.next()) {
                (None, None) => return Some(param),
                (Some(p), Some(s)) if p.starts_with(':') && !s.is_empty() => {
                    param = Some(s.to_string());
                }
                (Some(p), Some(s)) if p == s => {}
                _ => return None,
            }
        }
    }
}

/// A path matched against the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'a> {
    pub route: &'a RouteSpec,
    pub param: Option<String>,
}

/// Path to screen mapping of the dashboard
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<RouteSpec>,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl RouteTable {
    /// The salon dashboard routes
    pub fn standard() -> Self {
        use Resource::*;

        Self {
            routes: vec![
                RouteSpec::new("/login", Screen::Login, Access::Public),
                RouteSpec::new("/register", Screen::Register, Access::Public),
                RouteSpec::new("/reset-password", Screen::ResetPassword, Access::Public),
                RouteSpec::new("/update-password", Screen::UpdatePassword, Access::Public),
                RouteSpec::new("/verify-email", Screen::VerifyEmail, Access::Public),
                RouteSpec::new("/booking", Screen::Booking, Access::Public),
                RouteSpec::new("/cancel/:token", Screen::CancelAppointment, Access::Public),
                RouteSpec::new("/", Screen::Dashboard, Access::signed_in()),
                RouteSpec::new("/customers", Screen::Customers, Access::read(Customers)),
                RouteSpec::new(
                    "/customers/new",
                    Screen::CustomerForm,
                    Access::permission(Customers, PermissionKind::Write),
                ),
                RouteSpec::new("/customers/:id", Screen::CustomerDetail, Access::read(Customers)),
                RouteSpec::new("/appointments", Screen::Appointments, Access::read(Appointments)),
                RouteSpec::new("/calendar", Screen::Calendar, Access::read(Appointments)),
                RouteSpec::new("/inventory", Screen::Inventory, Access::read(Inventory)),
                RouteSpec::new("/expenses", Screen::Expenses, Access::read(Finances)),
                RouteSpec::new("/revenues", Screen::Revenues, Access::read(Finances)),
                RouteSpec::new("/finances", Screen::Finances, Access::read(Finances)),
                RouteSpec::new("/tasks", Screen::Tasks, Access::read(Tasks)),
                RouteSpec::new("/marketing", Screen::Marketing, Access::read(Marketing)),
                RouteSpec::new("/loyalty", Screen::Loyalty, Access::read(Loyalty)),
                RouteSpec::new("/social-media", Screen::SocialMedia, Access::read(SocialMedia)),
                RouteSpec::new(
                    "/notifications",
                    Screen::Notifications,
                    Access::read(Notifications),
                ),
                RouteSpec::new("/settings", Screen::Settings, Access::signed_in()),
                RouteSpec::new(
                    "/settings/users",
                    Screen::UserManagement,
                    Access::role(Role::Admin, "/settings"),
                ),
            ],
        }
    }

    pub fn routes(&self) -> &[RouteSpec] {
        &self.routes
    }

    /// Match a location; literal patterns win over parameterized ones
    pub fn resolve(&self, location: &str) -> Option<RouteMatch<'_>> {
        let path = normalize(location);
        let literal = self
            .routes
            .iter()
            .filter(|route| !route.has_param())
            .find_map(|route| route.matches(&path).map(|param| (route, param)));
        let (route, param) = literal.or_else(|| {
            self.routes
                .iter()
                .filter(|route| route.has_param())
                .find_map(|route| route.matches(&path).map(|param| (route, param)))
        })?;
        Some(RouteMatch { route, param })
    }

    /// Pattern registered for a screen
    pub fn path_of(&self, screen: Screen) -> Option<&'static str> {
        self.routes
            .iter()
            .find(|route| route.screen == screen)
            .map(|route| route.pattern)
    }
}

/// Drop the query string, fragment and trailing slash of a location
pub fn normalize(location: &str) -> String {
    let path = location
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim();
    let path = path.trim_end_matches('/');
    if path.is_empty() {
        "/".to_string()
    } else if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}
