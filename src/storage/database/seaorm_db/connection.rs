use crate::config::DatabaseConfig;
use crate::utils::error::{GlowError, Result};
use sea_orm::*;
use sea_orm_migration::MigratorTrait;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::super::entities;
use super::super::migration::Migrator;
use super::types::{DatabaseBackendType, DatabaseStats, SeaOrmDatabase};

impl SeaOrmDatabase {
    /// Open a connection pool for the configured URL
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        let backend_type = if config.url.starts_with("sqlite") {
            DatabaseBackendType::SQLite
        } else {
            DatabaseBackendType::PostgreSQL
        };

        let mut opt = ConnectOptions::new(config.url.clone());
        opt.max_connections(config.max_connections)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.connection_timeout))
            .acquire_timeout(Duration::from_secs(30))
            .sqlx_logging(true)
            .sqlx_logging_level(log::LevelFilter::Debug);

        // Every in-memory sqlite connection is its own database
        if config.url.contains(":memory:") {
            opt.max_connections(1);
        } else {
            opt.idle_timeout(Duration::from_secs(600))
                .max_lifetime(Duration::from_secs(3600));
        }

        let db = Database::connect(opt).await.map_err(GlowError::Database)?;
        info!("Database connection established ({:?})", backend_type);

        Ok(Self { db, backend_type })
    }

    /// Open the database and apply migrations when configured to
    pub async fn connect_and_migrate(config: &DatabaseConfig) -> Result<Self> {
        let db = Self::new(config).await?;
        if config.auto_migrate {
            db.migrate().await?;
        }
        Ok(db)
    }

    /// Get the current backend type
    pub fn backend_type(&self) -> DatabaseBackendType {
        self.backend_type
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        info!("Running database migrations...");
        Migrator::up(&self.db, None).await.map_err(|e| {
            warn!("Migration failed: {}", e);
            GlowError::Database(e)
        })?;
        info!("Database migrations completed successfully");
        Ok(())
    }

    /// Get the underlying database connection
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Close the database connection
    pub async fn close(self) -> Result<()> {
        self.db.close().await.map_err(GlowError::Database)?;
        Ok(())
    }

    /// Health check
    pub async fn health_check(&self) -> Result<()> {
        debug!("Performing database health check");

        entities::User::find()
            .limit(1)
            .all(&self.db)
            .await
            .map_err(GlowError::Database)?;

        debug!("Database health check passed");
        Ok(())
    }

    /// Row counts of the main tables
    pub async fn stats(&self) -> Result<DatabaseStats> {
        Ok(DatabaseStats {
            users: entities::User::find().count(&self.db).await?,
            customers: entities::Customer::find().count(&self.db).await?,
            appointments: entities::Appointment::find().count(&self.db).await?,
        })
    }
}
