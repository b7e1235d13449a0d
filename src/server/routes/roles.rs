//! User management and permission introspection
//!
//! Role administration needs the users resource: read to list, write to
//! assign, delete to revoke. Only administrators may hand out the admin
//! role. Any signed-in user may read their own permission matrix.

use crate::auth::rbac::{PermissionKind, Resource, Role};
use crate::server::middleware::AuthenticatedUser;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::GlowError;
use crate::utils::logging::SecurityLog;
use actix_web::{HttpResponse, Result as ActixResult, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Configure role routes (mounted under `/api`)
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/me/permissions", web::get().to(my_permissions))
        .route("/users", web::get().to(list_users))
        .route("/roles", web::get().to(list_assignments))
        .route("/roles", web::post().to(assign_role))
        .route("/roles/{user_id}/{role}", web::delete().to(revoke_role));
}

/// One row of the user management screen
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub email_verified: bool,
    pub last_sign_in_at: Option<DateTime<Utc>>,
    pub roles: Vec<Role>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoleChange {
    pub user_id: Uuid,
    pub role: Role,
}

pub async fn my_permissions(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> ActixResult<HttpResponse> {
    let permissions = state.resolver.effective_permissions(user.user_id()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(permissions)))
}

pub async fn list_users(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> ActixResult<HttpResponse> {
    user.require(&state, Resource::Users, PermissionKind::Read).await?;

    let mut roles: HashMap<Uuid, Vec<Role>> = state
        .resolver
        .assignments()
        .await?
        .into_iter()
        .map(|a| (a.user_id, a.roles))
        .collect();
    let users: Vec<UserSummary> = state
        .storage
        .db()
        .list_users()
        .await?
        .into_iter()
        .map(|u| UserSummary {
            roles: roles.remove(&u.id).unwrap_or_default(),
            id: u.id,
            email: u.email,
            display_name: u.display_name,
            email_verified: u.email_verified,
            last_sign_in_at: u.last_sign_in_at,
        })
        .collect();
    Ok(HttpResponse::Ok().json(ApiResponse::success(users)))
}

pub async fn list_assignments(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> ActixResult<HttpResponse> {
    user.require(&state, Resource::Users, PermissionKind::Read).await?;
    let assignments = state.resolver.assignments().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(assignments)))
}

pub async fn assign_role(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    change: web::Json<RoleChange>,
) -> ActixResult<HttpResponse> {
    user.require(&state, Resource::Users, PermissionKind::Write).await?;
    let RoleChange { user_id, role } = change.into_inner();
    if role == Role::Admin {
        if let Err(e) = user.require_role(&state, Role::Admin).await {
            SecurityLog::access_denied(user.user_id(), "grant admin role", "caller is not an administrator");
            return Err(e.into());
        }
    }
    if state.storage.db().find_user_by_id(user_id).await?.is_none() {
        return Err(GlowError::not_found(format!("user {} not found", user_id)).into());
    }

    state.resolver.assign_role(user_id, role).await?;
    SecurityLog::role_change(Some(user.user_id()), user_id, role.as_str(), true);
    Ok(HttpResponse::Ok().json(ApiResponse::done()))
}

pub async fn revoke_role(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<(Uuid, String)>,
) -> ActixResult<HttpResponse> {
    user.require(&state, Resource::Users, PermissionKind::Delete).await?;
    let (user_id, role) = path.into_inner();
    let role: Role = role.parse().map_err(GlowError::bad_request)?;
    if user_id == user.user_id() && role == Role::Admin {
        return Err(GlowError::conflict("administrators cannot revoke their own admin role").into());
    }

    state.resolver.revoke_role(user_id, role).await?;
    SecurityLog::role_change(Some(user.user_id()), user_id, role.as_str(), false);
    Ok(HttpResponse::Ok().json(ApiResponse::done()))
}
