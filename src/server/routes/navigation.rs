//! Route resolution for the dashboard client
//!
//! The client asks where a location leads before rendering it; the answer is
//! the screen plus the guard decision for the caller's session.

use crate::auth::AuthState;
use crate::navigation::{NavigationShell, ShellItem};
use crate::server::middleware::{AuthenticatedUser, MaybeUser};
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use actix_web::{HttpResponse, Result as ActixResult, web};
use serde::{Deserialize, Serialize};

/// Configure navigation routes (mounted under `/api`)
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/navigate", web::get().to(navigate))
        .route("/shell", web::get().to(shell));
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationQuery {
    #[serde(default = "root")]
    pub path: String,
}

fn root() -> String {
    "/".to_string()
}

/// Sidebar entries of the signed-in user
#[derive(Debug, Clone, Serialize)]
pub struct ShellView {
    pub location: String,
    pub items: Vec<ShellItem>,
}

pub async fn navigate(
    state: web::Data<AppState>,
    user: MaybeUser,
    query: web::Query<LocationQuery>,
) -> ActixResult<HttpResponse> {
    let auth = match user.0 {
        Some(session) => AuthState::Authenticated(session),
        None => AuthState::Unauthenticated,
    };
    let navigation = state
        .navigator
        .route(&query.path, &auth, &state.resolver)
        .await;
    Ok(HttpResponse::Ok().json(ApiResponse::success(navigation)))
}

pub async fn shell(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    query: web::Query<LocationQuery>,
) -> ActixResult<HttpResponse> {
    let permissions = state.resolver.effective_permissions(user.user_id()).await?;
    let shell = NavigationShell::new(&permissions, &query.path);
    let view = ShellView {
        location: shell.location().to_string(),
        items: shell.view(),
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(view)))
}
