//! Account registration and e-mail confirmation

use super::models::{SignUpRequest, TokenRequest};
use crate::auth::IdentityBackend;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use actix_web::{HttpResponse, Result as ActixResult, web};

pub async fn sign_up(
    state: web::Data<AppState>,
    request: web::Json<SignUpRequest>,
) -> ActixResult<HttpResponse> {
    let registration = state
        .identity
        .sign_up(&request.email, &request.password, &request.full_name)
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(registration)))
}

pub async fn verify_email(
    state: web::Data<AppState>,
    request: web::Json<TokenRequest>,
) -> ActixResult<HttpResponse> {
    state.identity.verify_email(&request.token).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::done()))
}
