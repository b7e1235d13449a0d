//! Account factories

use super::database::TestApp;
use glowdesk::auth::IdentityBackend;
use glowdesk::auth::rbac::Role;
use uuid::Uuid;

/// Password of every factory account
pub const PASSWORD: &str = "correct-horse-battery";

/// A registered account and its credentials
#[derive(Debug, Clone)]
pub struct TestAccount {
    pub user_id: Uuid,
    pub email: String,
}

impl TestAccount {
    /// Register `email` and give it `roles`
    pub async fn create(app: &TestApp, email: &str, roles: &[Role]) -> Self {
        let registration = app
            .identity
            .sign_up(email, PASSWORD, "Salon Staff")
            .await
            .expect("sign up failed");
        for role in roles {
            app.resolver
                .assign_role(registration.user_id, *role)
                .await
                .expect("role assignment failed");
        }
        Self {
            user_id: registration.user_id,
            email: registration.email,
        }
    }
}
