//! HTTP server utility methods

use crate::server::server::HttpServer;
use crate::utils::error::GlowError;
use tracing::{info, warn};

impl HttpServer {
    /// Resolves on Ctrl+C or SIGTERM
    pub async fn shutdown_signal() {
        let ctrl_c = async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Received Ctrl+C signal, shutting down gracefully"),
                Err(e) => warn!("Failed to install Ctrl+C handler: {}", e),
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(mut signal) => {
                    signal.recv().await;
                    info!("Received terminate signal, shutting down gracefully");
                }
                Err(e) => {
                    warn!("Failed to install SIGTERM handler: {}", e);
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {},
            _ = terminate => {},
        }
    }

    /// Format a user-friendly error message for port binding failures
    pub(crate) fn format_bind_error(
        error: std::io::Error,
        bind_addr: &str,
        port: u16,
    ) -> GlowError {
        let error_str = error.to_string();

        if error.kind() == std::io::ErrorKind::AddrInUse
            || error_str.contains("os error 48")
            || error_str.contains("os error 98")
        {
            GlowError::Config(format!(
                "port {} is already in use; stop the other process (lsof -i:{}) \
                 or start with --port {}",
                port,
                port,
                port.saturating_add(1)
            ))
        } else if error.kind() == std::io::ErrorKind::PermissionDenied
            || error_str.contains("os error 13")
        {
            GlowError::Config(format!(
                "permission denied for port {}; use a port of 1024 or above, e.g. --port 8000",
                port
            ))
        } else {
            GlowError::internal(format!("Failed to bind to {}: {}", bind_addr, error))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_format_bind_error_address_in_use() {
        let error = Error::new(ErrorKind::AddrInUse, "Address already in use");
        let result = HttpServer::format_bind_error(error, "0.0.0.0:8080", 8080);

        let error_msg = result.to_string();
        assert!(error_msg.contains("8080"));
        assert!(error_msg.contains("already in use"));
        assert!(error_msg.contains("8081"));
        assert!(error_msg.contains("lsof"));
    }

    #[test]
    fn test_format_bind_error_os_error_98() {
        let error = Error::other("os error 98");
        let result = HttpServer::format_bind_error(error, "127.0.0.1:9000", 9000);
        assert!(result.to_string().contains("9001"));
    }

    #[test]
    fn test_format_bind_error_permission_denied() {
        let error = Error::new(ErrorKind::PermissionDenied, "Permission denied");
        let result = HttpServer::format_bind_error(error, "0.0.0.0:80", 80);

        let error_msg = result.to_string();
        assert!(error_msg.contains("80"));
        assert!(error_msg.contains("permission denied"));
        assert!(error_msg.contains("1024"));
    }

    #[test]
    fn test_format_bind_error_max_port() {
        let error = Error::new(ErrorKind::AddrInUse, "Address already in use");
        let result = HttpServer::format_bind_error(error, "0.0.0.0:65535", 65535);
        assert!(result.to_string().contains("65535"));
    }

    #[test]
    fn test_format_bind_error_generic() {
        let error = Error::other("Network unreachable");
        let result = HttpServer::format_bind_error(error, "192.168.1.1:8080", 8080);

        let error_msg = result.to_string();
        assert!(error_msg.contains("Failed to bind"));
        assert!(error_msg.contains("192.168.1.1:8080"));
        assert!(error_msg.contains("Network unreachable"));
    }
}
