//! Authentication and authorization system
//!
//! Identity and sessions (`backend`, `local`, `session`), JWT access tokens
//! and role-based access control.

pub mod backend;
pub mod jwt;
pub mod local;
pub mod rate_limiter;
pub mod rbac;
pub mod session;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::{IdentityBackend, LogMailer, Mailer, OutboxMailer, OutgoingMail};
pub use local::LocalIdentity;
pub use rate_limiter::SignInLimiter;
pub use session::SessionProvider;
pub use types::{
    AccountProfile, AuthEvent, AuthEventKind, AuthOutcome, AuthState, DEFAULT_LANDING, LOGIN_ROUTE,
    Registration, Session,
};
