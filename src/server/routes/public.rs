//! Public booking and cancellation-by-link endpoints
//!
//! No authentication: the booking form is open and the cancellation token in
//! the path is the only credential.

use crate::salon::BookingRequest;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use actix_web::{HttpResponse, Result as ActixResult, web};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

/// Configure public routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/public")
            .route("/booking", web::post().to(book))
            .route("/slots", web::get().to(slots))
            .route("/cancel/{token}", web::get().to(cancellation_status))
            .route("/cancel/{token}", web::post().to(cancel)),
    );
}

#[derive(Debug, Clone, Deserialize)]
pub struct SlotQuery {
    pub day: NaiveDate,
    #[serde(default)]
    pub employee_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CancelRequest {
    #[serde(default)]
    pub reason: Option<String>,
}

pub async fn book(
    state: web::Data<AppState>,
    request: web::Json<BookingRequest>,
) -> ActixResult<HttpResponse> {
    let confirmation = state.booking.book(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(confirmation)))
}

pub async fn slots(
    state: web::Data<AppState>,
    query: web::Query<SlotQuery>,
) -> ActixResult<HttpResponse> {
    let slots = state
        .booking
        .available_slots(query.day, query.employee_id)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(slots)))
}

/// What the cancellation page shows for a link
pub async fn cancellation_status(
    state: web::Data<AppState>,
    token: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let status = state.cancellation.lookup(&token).await?;
    if !status.is_valid() {
        debug!("Cancellation link lookup: {:?}", status);
    }
    Ok(HttpResponse::Ok().json(ApiResponse::success(status)))
}

pub async fn cancel(
    state: web::Data<AppState>,
    token: web::Path<String>,
    request: Option<web::Json<CancelRequest>>,
) -> ActixResult<HttpResponse> {
    let reason = request.and_then(|r| r.into_inner().reason);
    let receipt = state.cancellation.cancel(&token, reason).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(receipt)))
}
