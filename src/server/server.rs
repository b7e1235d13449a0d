//! HTTP server core implementation

use crate::auth::{LogMailer, Mailer};
use crate::config::{Config, ServerConfig};
use crate::server::routes;
use crate::server::state::AppState;
use crate::storage::StorageLayer;
use crate::utils::error::{GlowError, Result};
use actix_cors::Cors;
use actix_web::{
    App, HttpServer as ActixHttpServer,
    middleware::{DefaultHeaders, Logger},
    web,
};
use std::sync::Arc;
use tracing::info;

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server that logs outgoing mail
    pub async fn new(config: &Config) -> Result<Self> {
        Self::with_mailer(config, Arc::new(LogMailer)).await
    }

    /// Create a new HTTP server delivering mail through `mailer`
    pub async fn with_mailer(config: &Config, mailer: Arc<dyn Mailer>) -> Result<Self> {
        info!("Creating HTTP server");

        let storage = StorageLayer::new(&config.storage).await?;
        if config.demo.seed_on_empty {
            let report = storage.demo_fixture().seed_if_empty().await?;
            if !report.is_empty() {
                info!("Seeded demo data: {:?}", report);
            }
        }

        Ok(Self {
            config: config.server.clone(),
            state: AppState::new(config.clone(), storage, mailer),
        })
    }

    /// Create the Actix-web application
    pub(crate) fn create_app(
        state: web::Data<AppState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let server = &state.config.server;
        let cors_config = &server.cors;
        let mut cors = Cors::default();

        if cors_config.enabled {
            if cors_config.allows_all_origins() {
                cors = cors.allow_any_origin();
                cors_config.warn_if_permissive();
            } else {
                for origin in &cors_config.allowed_origins {
                    cors = cors.allowed_origin(origin);
                }
            }

            cors = cors
                .allow_any_method()
                .allow_any_header()
                .max_age(cors_config.max_age);

            if cors_config.allow_credentials {
                cors = cors.supports_credentials();
            }
        }

        let json = web::JsonConfig::default().limit(server.max_body_size);

        App::new()
            .app_data(state)
            .app_data(json)
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(DefaultHeaders::new().add(("Server", "GlowDesk")))
            .configure(routes::configure_routes)
    }

    /// Start the HTTP server and serve until a shutdown signal arrives
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.address();
        let port = self.config.port;

        info!("Starting HTTP server on {}", bind_addr);

        let storage = self.state.storage.clone();
        let state = web::Data::new(self.state);

        let server = ActixHttpServer::new(move || Self::create_app(state.clone()))
            .workers(self.config.worker_count())
            .disable_signals()
            .bind(&bind_addr)
            .map_err(|e| Self::format_bind_error(e, &bind_addr, port))?
            .run();

        info!("HTTP server listening on {}", bind_addr);

        let handle = server.handle();
        tokio::spawn(async move {
            Self::shutdown_signal().await;
            handle.stop(true).await;
        });

        server
            .await
            .map_err(|e| GlowError::internal(format!("Server error: {}", e)))?;

        storage.close().await?;
        info!("HTTP server stopped");
        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}
