//! Server builder and run_server function

use crate::auth::Mailer;
use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::{GlowError, Result};
use std::sync::Arc;
use tracing::info;

/// Server builder for easier configuration
#[derive(Default)]
pub struct ServerBuilder {
    config: Option<Config>,
    mailer: Option<Arc<dyn Mailer>>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Deliver e-mail through `mailer` instead of the log
    pub fn with_mailer(mut self, mailer: Arc<dyn Mailer>) -> Self {
        self.mailer = Some(mailer);
        self
    }

    /// Build the HTTP server
    pub async fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| GlowError::Config("Configuration is required".to_string()))?;
        config.validate()?;

        match self.mailer {
            Some(mailer) => HttpServer::with_mailer(&config, mailer).await,
            None => HttpServer::new(&config).await,
        }
    }
}

/// Run the server for a loaded configuration
pub async fn run_server(config: Config) -> Result<()> {
    info!("Starting GlowDesk for {}", config.salon.name);

    let server = ServerBuilder::new().with_config(config).build().await?;
    info!("Dashboard links point at {}", server.state().config.server.public_url);
    info!("API Endpoints:");
    info!("   GET  /health - Health check");
    info!("   POST /auth/sign-in - Sign in");
    info!("   GET  /api/{{table}} - Dashboard records");
    info!("   POST /public/booking - Online booking");
    info!("   POST /public/cancel/{{token}} - Cancel by link");

    server.start().await
}
