//! Session extractors

use super::helpers::extract_bearer_token;
use crate::auth::Session;
use crate::auth::rbac::{PermissionKind, Resource, Role};
use crate::server::state::AppState;
use crate::utils::error::{GlowError, Result};
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, web};
use futures::future::LocalBoxFuture;
use tracing::debug;
use uuid::Uuid;

/// The live session behind the request's bearer token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Session);

impl AuthenticatedUser {
    pub fn session(&self) -> &Session {
        &self.0
    }

    pub fn user_id(&self) -> Uuid {
        self.0.user_id
    }

    /// Fail with 403 unless a held role grants `kind` on `resource`
    pub async fn require(
        &self,
        state: &AppState,
        resource: Resource,
        kind: PermissionKind,
    ) -> Result<()> {
        let check = state.resolver.authorize(self.user_id(), resource, kind).await;
        if check.granted {
            Ok(())
        } else {
            Err(GlowError::authorization(format!(
                "{} on {} is not granted",
                kind, resource
            )))
        }
    }

    /// Fail with 403 unless the user holds `role`
    pub async fn require_role(&self, state: &AppState, role: Role) -> Result<()> {
        if state.resolver.has_role(self.user_id(), role).await? {
            Ok(())
        } else {
            Err(GlowError::authorization(format!("role {} is required", role)))
        }
    }
}

async fn resolve(state: Option<web::Data<AppState>>, token: Option<String>) -> Result<Session> {
    let state = state.ok_or_else(|| GlowError::internal("application state is not registered"))?;
    let token = token.ok_or_else(|| GlowError::session("missing bearer token"))?;
    state.identity.authenticate(&token).await
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, std::result::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let token = extract_bearer_token(req.headers()).map(str::to_string);
        Box::pin(async move { Ok(AuthenticatedUser(resolve(state, token).await?)) })
    }
}

/// The session of the request, or `None` for anonymous visitors
///
/// An invalid or expired token counts as anonymous.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<Session>);

impl FromRequest for MaybeUser {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, std::result::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let token = extract_bearer_token(req.headers()).map(str::to_string);
        Box::pin(async move {
            if token.is_none() {
                return Ok(MaybeUser(None));
            }
            match resolve(state, token).await {
                Ok(session) => Ok(MaybeUser(Some(session))),
                Err(e) => {
                    debug!("Ignoring unusable bearer token: {}", e);
                    Ok(MaybeUser(None))
                }
            }
        })
    }
}
