//! Configuration data models
//!
//! This module defines all configuration structures used by the service.

#![allow(missing_docs)]

pub mod auth;
pub mod logging;
pub mod salon;
pub mod server;
pub mod storage;

// Re-export all configuration types
pub use auth::*;
pub use logging::*;
pub use salon::*;
pub use server::*;
pub use storage::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8080
}

/// Default maximum body size in bytes
pub fn default_max_body_size() -> usize {
    2 * 1024 * 1024 // 2MB
}

pub fn default_max_connections() -> u32 {
    10
}

pub fn default_connection_timeout() -> u64 {
    5
}

pub fn default_true() -> bool {
    true
}
