//! Application state shared across HTTP handlers

use crate::auth::rbac::{PermissionResolver, RoleStore};
use crate::auth::{LocalIdentity, Mailer};
use crate::config::Config;
use crate::navigation::Navigator;
use crate::salon::{BookingService, CancellationPolicy, CancellationService};
use crate::storage::StorageLayer;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// Every service is built once from the configuration and handed to the
/// handlers through `web::Data`; nothing is reached through globals.
#[derive(Clone)]
pub struct AppState {
    /// Configuration (shared read-only)
    pub config: Arc<Config>,
    pub storage: Arc<StorageLayer>,
    /// Accounts and sessions
    pub identity: Arc<LocalIdentity>,
    pub resolver: PermissionResolver,
    pub cancellation: CancellationService,
    pub booking: BookingService,
    pub navigator: Navigator,
}

impl AppState {
    /// Wire every service on top of an initialized storage layer
    pub fn new(config: Config, storage: StorageLayer, mailer: Arc<dyn Mailer>) -> Self {
        let db = storage.db().clone();
        let roles: Arc<dyn RoleStore> = Arc::new(db.clone());
        let resolver = PermissionResolver::new(roles, &config.rbac);
        let identity = LocalIdentity::new(db.clone(), &config, resolver.clone(), mailer.clone());
        let cancellation =
            CancellationService::new(db.clone(), CancellationPolicy::from_config(&config.salon));
        let booking = BookingService::new(db, cancellation.clone(), &config, mailer);

        Self {
            config: Arc::new(config),
            storage: Arc::new(storage),
            identity: Arc::new(identity),
            resolver,
            cancellation,
            booking,
            navigator: Navigator::default(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("salon", &self.config.salon.name)
            .field("resolver", &self.resolver)
            .finish()
    }
}
