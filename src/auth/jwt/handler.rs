//! Core JWT handler implementation

use super::types::{ACCESS_AUDIENCE, Claims, JwtHandler};
use crate::config::AuthConfig;
use crate::utils::error::{GlowError, Result};
use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use tracing::{debug, warn};
use uuid::Uuid;

/// What an access token says about its bearer
#[derive(Debug, Clone, Copy)]
pub struct AccessGrant<'a> {
    pub user_id: Uuid,
    pub session_id: Uuid,
    pub email: &'a str,
    pub display_name: &'a str,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl JwtHandler {
    /// Create a new JWT handler
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.as_bytes();

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            issuer: config.issuer.clone(),
        }
    }

    /// Create an access token valid until `grant.expires_at`
    pub fn create_access_token(&self, grant: AccessGrant<'_>) -> Result<String> {
        let claims = Claims {
            sub: grant.user_id,
            sid: grant.session_id,
            email: grant.email.to_string(),
            name: grant.display_name.to_string(),
            iat: grant.issued_at.timestamp(),
            exp: grant.expires_at.timestamp(),
            iss: self.issuer.clone(),
            aud: ACCESS_AUDIENCE.to_string(),
            jti: Uuid::new_v4().to_string(),
        };

        let header = Header::new(self.algorithm);
        let token = encode(&header, &claims, &self.encoding_key).map_err(GlowError::Jwt)?;

        debug!("Created access token for user: {}", grant.user_id);
        Ok(token)
    }

    /// Verify signature, issuer, audience and expiry of a token
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(self.algorithm);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[ACCESS_AUDIENCE]);
        validation.leeway = 0;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            warn!("JWT verification failed: {}", e);
            GlowError::Jwt(e)
        })?;

        debug!("Token verified for user: {}", token_data.claims.sub);
        Ok(token_data.claims)
    }

    /// Extract token from Authorization header
    pub fn extract_token_from_header(header_value: &str) -> Option<&str> {
        header_value
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }
}
