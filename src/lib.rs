//! # GlowDesk
//!
//! Back office of a nail and beauty salon: accounts and sessions, role-based
//! access control, guarded dashboard navigation, the record screens behind
//! it, and the public booking page with cancellation links.
//!
//! ## Running the service
//!
//! ```rust,no_run
//! use glowdesk::{Config, GlowDesk};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/glowdesk.yaml").await?;
//!     let app = GlowDesk::new(config).await?;
//!     app.run().await?;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod auth;
pub mod config;
pub mod core;
pub mod guard;
pub mod navigation;
pub mod salon;
pub mod screens;
pub mod server;
pub mod storage;
pub mod utils;

pub use config::Config;
pub use utils::error::{GlowError, Result};

pub use auth::rbac::{PermissionKind, PermissionResolver, Resource, Role};
pub use auth::{AuthState, Session, SessionProvider};
pub use guard::{AuthGuard, GuardDecision, Guarded, PermissionGuard};
pub use navigation::{NavigationShell, Navigator, RouteTable, Screen};
pub use salon::{BookingService, CancellationPolicy, CancellationService};

use tracing::info;

/// The GlowDesk service: configuration plus its HTTP server
pub struct GlowDesk {
    config: Config,
    server: server::HttpServer,
}

impl GlowDesk {
    /// Connect storage and wire every service
    pub async fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let server = server::HttpServer::new(&config).await?;
        Ok(Self { config, server })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Serve until a shutdown signal arrives
    pub async fn run(self) -> Result<()> {
        let info = build_info();
        info!(
            "Starting GlowDesk {} ({}) for {}",
            info.version, info.git_hash, self.config.salon.name
        );
        self.server.start().await
    }
}

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    pub version: &'static str,
    /// Seconds since the Unix epoch
    pub build_time: &'static str,
    pub git_hash: &'static str,
    pub rust_version: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: env!("BUILD_TIME"),
            git_hash: env!("GIT_HASH"),
            rust_version: env!("RUST_VERSION"),
        }
    }
}

pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
