//! Sign-in, sign-out and session refresh

use super::models::{RefreshRequest, SessionInfo, SignInRequest};
use crate::auth::IdentityBackend;
use crate::server::middleware::AuthenticatedUser;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use actix_web::{HttpResponse, Result as ActixResult, web};
use tracing::debug;

/// Exchange e-mail and password for a session
pub async fn sign_in(
    state: web::Data<AppState>,
    request: web::Json<SignInRequest>,
) -> ActixResult<HttpResponse> {
    let request = request.into_inner();
    let session = state
        .identity
        .sign_in_with_password(&request.email, &request.password, request.remember_me)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(session)))
}

pub async fn sign_out(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> ActixResult<HttpResponse> {
    state.identity.sign_out(user.session()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::done()))
}

/// Rotate a refresh token into a new session
pub async fn refresh(
    state: web::Data<AppState>,
    request: web::Json<RefreshRequest>,
) -> ActixResult<HttpResponse> {
    let session = state
        .identity
        .refresh_session(&request.refresh_token)
        .await?;
    debug!("Refreshed session {}", session.session_id);
    Ok(HttpResponse::Ok().json(ApiResponse::success(session)))
}

/// Who the bearer token belongs to
pub async fn current_session(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> ActixResult<HttpResponse> {
    let roles = state.resolver.get_user_roles(user.user_id()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(SessionInfo::new(user.session(), roles))))
}
