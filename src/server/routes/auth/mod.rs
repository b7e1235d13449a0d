//! Authentication endpoints
//!
//! Thin HTTP wrappers over the identity backend. Failed sign-ins and expired
//! links come back as the backend's errors, rendered with their localized
//! message.

mod models;
mod password;
mod register;
mod session;

pub use models::{
    EmailRequest, RefreshRequest, SessionInfo, SignInRequest, SignUpRequest, TokenRequest,
    UpdatePasswordRequest,
};
pub use password::{recover, reset_password, update_password};
pub use register::{sign_up, verify_email};
pub use session::{current_session, refresh, sign_in, sign_out};

use actix_web::web;

/// Configure authentication routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/sign-up", web::post().to(sign_up))
            .route("/sign-in", web::post().to(sign_in))
            .route("/sign-out", web::post().to(sign_out))
            .route("/refresh", web::post().to(refresh))
            .route("/session", web::get().to(current_session))
            .route("/reset-password", web::post().to(reset_password))
            .route("/recover", web::post().to(recover))
            .route("/update-password", web::post().to(update_password))
            .route("/verify-email", web::post().to(verify_email)),
    );
}
