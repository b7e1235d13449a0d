//! Sign-in, sign-out and guarded navigation across the session provider

#[cfg(test)]
mod tests {
    use crate::common::{PASSWORD, TestAccount, TestApp};
    use chrono::{Duration, Utc};
    use glowdesk::auth::rbac::Role;
    use glowdesk::auth::AuthState;
    use glowdesk::navigation::{Navigator, Screen};
    use glowdesk::utils::Notice;

    fn token_of(link: &str) -> String {
        link.rsplit("token=").next().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_visitor_returns_to_requested_location_after_sign_in() {
        let app = TestApp::new().await;
        let account = TestAccount::create(&app, "staff@salon.test", &[Role::Employee]).await;
        let provider = app.provider().await;
        let navigator = Navigator::default();

        let navigation = navigator
            .navigate("/inventory?low=1", &provider, &app.resolver)
            .await;
        assert_eq!(navigation.screen, Screen::Inventory);
        assert_eq!(navigation.redirect_target(), Some("/login"));

        let outcome = provider.sign_in(&account.email, PASSWORD, false).await;
        assert!(outcome.success);
        assert_eq!(outcome.redirect_to.as_deref(), Some("/inventory?low=1"));

        let navigation = navigator
            .navigate("/inventory?low=1", &provider, &app.resolver)
            .await;
        assert!(navigation.renders());
    }

    #[tokio::test]
    async fn test_employee_settings_scenario() {
        let app = TestApp::new().await;
        let account = TestAccount::create(&app, "ana@salon.test", &[Role::Employee]).await;
        let provider = app.provider().await;
        let navigator = Navigator::default();

        let before = Utc::now();
        let outcome = provider.sign_in(&account.email, PASSWORD, false).await;
        assert!(outcome.success);
        let session = provider.session().unwrap();
        assert!(session.refresh_token.is_none());
        assert!(session.expires_at <= before + Duration::hours(8) + Duration::seconds(5));
        assert!(session.expires_at > before + Duration::hours(7));

        let settings = navigator.navigate("/settings", &provider, &app.resolver).await;
        assert!(settings.renders());

        let users = navigator
            .navigate("/settings/users", &provider, &app.resolver)
            .await;
        assert_eq!(users.screen, Screen::UserManagement);
        assert_eq!(users.redirect_target(), Some("/settings"));
    }

    #[tokio::test]
    async fn test_sign_out_is_idempotent() {
        let app = TestApp::new().await;
        let provider = app.provider().await;

        let outcome = provider.sign_out().await;
        assert!(outcome.success);
        assert_eq!(provider.state(), AuthState::Unauthenticated);

        let outcome = provider.sign_out().await;
        assert!(outcome.success);
        assert_eq!(provider.state(), AuthState::Unauthenticated);
    }

    #[tokio::test]
    async fn test_signed_out_user_is_sent_to_login() {
        let app = TestApp::new().await;
        let account = TestAccount::create(&app, "bia@salon.test", &[Role::Owner]).await;
        let provider = app.provider().await;
        let navigator = Navigator::default();

        provider.sign_in(&account.email, PASSWORD, false).await;
        let token = provider.session().unwrap().access_token;
        assert!(navigator.navigate("/finances", &provider, &app.resolver).await.renders());

        provider.sign_out().await;
        let navigation = navigator.navigate("/finances", &provider, &app.resolver).await;
        assert_eq!(navigation.redirect_target(), Some("/login"));

        // The revoked token does not come back on the next visit
        let restored = glowdesk::auth::SessionProvider::start(app.identity.clone(), Some(token)).await;
        assert_eq!(restored.state(), AuthState::Unauthenticated);
    }

    #[tokio::test]
    async fn test_remember_me_session_refreshes() {
        let app = TestApp::new().await;
        let account = TestAccount::create(&app, "carla@salon.test", &[Role::Employee]).await;
        let provider = app.provider().await;

        provider.sign_in(&account.email, PASSWORD, true).await;
        let first = provider.session().unwrap();
        assert!(first.remember_me);
        assert!(first.expires_at > Utc::now() + Duration::days(29));
        let first_refresh = first.refresh_token.clone().unwrap();

        let outcome = provider.refresh().await;
        assert!(outcome.success);
        let second = provider.session().unwrap();
        assert_ne!(second.refresh_token.as_deref(), Some(first_refresh.as_str()));
    }

    #[tokio::test]
    async fn test_wrong_password_gives_generic_message() {
        let app = TestApp::new().await;
        let account = TestAccount::create(&app, "dani@salon.test", &[]).await;
        let provider = app.provider().await;

        let outcome = provider.sign_in(&account.email, "not-the-password", false).await;
        assert!(!outcome.success);
        assert_eq!(outcome.error, Some(Notice::InvalidCredentials.to_string()));

        let outcome = provider.sign_in("nobody@salon.test", PASSWORD, false).await;
        assert_eq!(outcome.error, Some(Notice::InvalidCredentials.to_string()));
        assert_eq!(provider.state(), AuthState::Unauthenticated);
    }

    #[tokio::test]
    async fn test_password_recovery_through_mailed_link() {
        let app = TestApp::new().await;
        let account = TestAccount::create(&app, "eva@salon.test", &[Role::Employee]).await;
        let provider = app.provider().await;

        assert!(provider.reset_password(&account.email).await.success);
        let link = app.mailer.last_link_to(&account.email).unwrap();
        assert!(link.contains("/update-password?token="));

        let outcome = provider.complete_recovery(&token_of(&link)).await;
        assert_eq!(outcome.redirect_to.as_deref(), Some("/update-password"));
        assert!(provider.update_password("brand-new-password").await.success);
        provider.sign_out().await;

        assert!(!provider.sign_in(&account.email, PASSWORD, false).await.success);
        assert!(provider.sign_in(&account.email, "brand-new-password", false).await.success);

        // Links are single use
        let again = provider.complete_recovery(&token_of(&link)).await;
        assert_eq!(again.error, Some(Notice::LinkExpired.to_string()));
    }
}
