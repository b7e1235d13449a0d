//! Utility modules
//!
//! - **crypto**: password hashing and opaque link tokens
//! - **error**: the crate error type and its HTTP mapping
//! - **lifecycle**: cancellation scopes for screens and subscriptions
//! - **logging**: tracing setup and security event records
//! - **messages**: user-facing notices
//! - **validation**: shared input checks

pub mod crypto;
pub mod error;
pub mod lifecycle;
pub mod logging;
pub mod messages;
pub mod validation;

pub use error::{GlowError, Result};
pub use lifecycle::Scope;
pub use messages::Notice;
