//! Test database utilities
//!
//! Each test gets an isolated in-memory database with the schema applied.

use glowdesk::auth::rbac::{PermissionResolver, RoleStore};
use glowdesk::auth::{LocalIdentity, OutboxMailer, SessionProvider};
use glowdesk::config::{Config, DatabaseConfig};
use glowdesk::salon::{BookingService, CancellationPolicy, CancellationService};
use glowdesk::storage::DemoFixture;
use glowdesk::storage::database::Database;
use std::sync::Arc;

/// Test database wrapper providing isolated in-memory SQLite instances
#[derive(Debug, Clone)]
pub struct TestDatabase {
    inner: Database,
}

impl TestDatabase {
    /// Create a migrated in-memory database
    pub async fn new() -> Self {
        let db = Database::connect_and_migrate(&DatabaseConfig::in_memory())
            .await
            .expect("Failed to create in-memory test database");
        Self { inner: db }
    }

    /// Create a test database holding the demo records
    pub async fn seeded() -> Self {
        let db = Self::new().await;
        DemoFixture::new(db.db().clone())
            .seed_if_empty()
            .await
            .expect("Failed to seed demo data");
        db
    }

    pub fn db(&self) -> &Database {
        &self.inner
    }
}

/// Every service of the application over one test database
pub struct TestApp {
    pub db: Database,
    pub config: Config,
    pub mailer: Arc<OutboxMailer>,
    pub resolver: PermissionResolver,
    pub identity: Arc<LocalIdentity>,
    pub cancellation: CancellationService,
    pub booking: BookingService,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(Config::default()).await
    }

    pub async fn with_config(mut config: Config) -> Self {
        config.storage.database = DatabaseConfig::in_memory();
        let db = TestDatabase::new().await.db().clone();
        let mailer = Arc::new(OutboxMailer::new());
        let roles: Arc<dyn RoleStore> = Arc::new(db.clone());
        let resolver = PermissionResolver::new(roles, &config.rbac);
        let identity = Arc::new(LocalIdentity::new(
            db.clone(),
            &config,
            resolver.clone(),
            mailer.clone(),
        ));
        let cancellation =
            CancellationService::new(db.clone(), CancellationPolicy::from_config(&config.salon));
        let booking =
            BookingService::new(db.clone(), cancellation.clone(), &config, mailer.clone());

        Self {
            db,
            config,
            mailer,
            resolver,
            identity,
            cancellation,
            booking,
        }
    }

    /// A fresh client session provider with nothing stored
    pub async fn provider(&self) -> SessionProvider {
        SessionProvider::start(self.identity.clone(), None).await
    }
}
