//! Storage layer
//!
//! The relational database behind every screen, the generic record
//! repository and the first-run demo fixture.

/// Database storage module
pub mod database;
/// Demo data seeding
pub mod fixtures;
/// Form payloads of the business tables
pub mod records;
/// Generic CRUD over the business tables
pub mod repository;

pub use fixtures::{DemoFixture, SeedReport};
pub use repository::{RecordFilter, RecordRepository, SalonRecord};

use crate::config::StorageConfig;
use crate::utils::error::Result;
use tracing::{debug, info, warn};

/// Owns the database handle shared by the rest of the application
#[derive(Debug, Clone)]
pub struct StorageLayer {
    /// Database connection pool
    pub database: database::Database,
}

impl StorageLayer {
    /// Connect (and migrate when configured) the storage backends
    pub async fn new(config: &StorageConfig) -> Result<Self> {
        info!("Initializing storage layer");

        debug!("Connecting to database");
        let database = database::Database::connect_and_migrate(&config.database).await?;

        info!("Storage layer initialized successfully");
        Ok(Self { database })
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        info!("Running database migrations");
        self.database.migrate().await?;
        info!("Database migrations completed");
        Ok(())
    }

    /// Health check for all storage backends
    pub async fn health_check(&self) -> StorageHealthStatus {
        let database = match self.database.health_check().await {
            Ok(()) => true,
            Err(e) => {
                warn!("Database health check failed: {}", e);
                false
            }
        };

        let stats = if database {
            match self.database.stats().await {
                Ok(stats) => Some(stats),
                Err(e) => {
                    warn!("Collecting database stats failed: {}", e);
                    None
                }
            }
        } else {
            None
        };

        StorageHealthStatus {
            database,
            stats,
            overall: database,
        }
    }

    /// Repository of one business table
    pub fn records<R>(&self) -> RecordRepository<R>
    where
        R: SalonRecord + sea_orm::IntoActiveModel<R::Active>,
    {
        RecordRepository::new(self.database.clone())
    }

    pub fn demo_fixture(&self) -> DemoFixture {
        DemoFixture::new(self.database.clone())
    }

    /// Close all connections
    pub async fn close(&self) -> Result<()> {
        info!("Closing storage connections");
        self.database.clone().close().await?;
        info!("Storage connections closed");
        Ok(())
    }

    /// Get database pool
    pub fn db(&self) -> &database::Database {
        &self.database
    }
}

/// Storage health status
#[derive(Debug, Clone, serde::Serialize)]
pub struct StorageHealthStatus {
    /// Database health status
    pub database: bool,
    /// Row counts, when the database answered
    pub stats: Option<database::DatabaseStats>,
    /// Overall health status
    pub overall: bool,
}
