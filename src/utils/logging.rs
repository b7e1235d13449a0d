//! Logging setup and security event logging

use crate::config::LoggingConfig;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

static SECURITY_EVENTS: AtomicBool = AtomicBool::new(true);

/// Install the global tracing subscriber
///
/// `RUST_LOG` takes precedence over the configured level. Calling this twice
/// is harmless; the second call keeps the first subscriber.
pub fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},sqlx=warn", config.level)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false);

    let installed = if config.json {
        builder.json().try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    };

    SECURITY_EVENTS.store(config.security_events, Ordering::Relaxed);

    if installed {
        debug!(json = config.json, level = %config.level, "Tracing initialized");
    }
}

/// Structured records of security-relevant events
pub struct SecurityLog;

impl SecurityLog {
    fn enabled() -> bool {
        SECURITY_EVENTS.load(Ordering::Relaxed)
    }

    /// Sign-in, sign-up, password reset and similar identity events
    pub fn auth_event(event: &str, email: &str, user_id: Option<Uuid>, success: bool) {
        if !Self::enabled() {
            return;
        }
        let email = mask_email(email);
        if success {
            info!(target: "security", event, %email, ?user_id, success, "Authentication success");
        } else {
            warn!(target: "security", event, %email, ?user_id, success, "Authentication failure");
        }
    }

    /// Resource permission or role denial
    pub fn access_denied(user_id: Uuid, what: &str, reason: &str) {
        if !Self::enabled() {
            return;
        }
        warn!(target: "security", %user_id, what, reason, "Access denied");
    }

    /// Role assignment or revocation
    pub fn role_change(actor: Option<Uuid>, user_id: Uuid, role: &str, granted: bool) {
        if !Self::enabled() {
            return;
        }
        info!(target: "security", ?actor, %user_id, role, granted, "Role changed");
    }
}

/// Keep the domain and the first character of an address
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let first = local.chars().next().unwrap_or('*');
            format!("{}***@{}", first, domain)
        }
        None => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("jane.doe@salon.example"), "j***@salon.example");
        assert_eq!(mask_email("nonsense"), "***");
    }

    #[test]
    fn test_init_tracing_twice_does_not_panic() {
        let config = LoggingConfig::default();
        init_tracing(&config);
        init_tracing(&config);
    }
}
