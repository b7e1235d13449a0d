//! Password recovery

use super::models::{EmailRequest, TokenRequest, UpdatePasswordRequest};
use crate::auth::IdentityBackend;
use crate::server::middleware::AuthenticatedUser;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use actix_web::{HttpResponse, Result as ActixResult, web};

/// Send a recovery link; answers the same for unknown addresses
pub async fn reset_password(
    state: web::Data<AppState>,
    request: web::Json<EmailRequest>,
) -> ActixResult<HttpResponse> {
    state
        .identity
        .reset_password_for_email(&request.email)
        .await?;
    Ok(HttpResponse::Accepted().json(ApiResponse::done()))
}

/// Trade the recovery link token for a session allowed to set a password
pub async fn recover(
    state: web::Data<AppState>,
    request: web::Json<TokenRequest>,
) -> ActixResult<HttpResponse> {
    let session = state
        .identity
        .exchange_recovery_token(&request.token)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(session)))
}

pub async fn update_password(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    request: web::Json<UpdatePasswordRequest>,
) -> ActixResult<HttpResponse> {
    state
        .identity
        .update_password(user.session(), &request.password)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::done()))
}
