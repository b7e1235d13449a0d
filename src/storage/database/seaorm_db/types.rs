use sea_orm::DatabaseConnection;

/// SeaORM-based database implementation
#[derive(Debug, Clone)]
pub struct SeaOrmDatabase {
    pub(super) db: DatabaseConnection,
    /// Backend type indicator
    pub(super) backend_type: DatabaseBackendType,
}

/// Database backend type indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseBackendType {
    PostgreSQL,
    SQLite,
}

/// Rows written when someone signs up
#[derive(Debug, Clone, Copy)]
pub struct NewAccount<'a> {
    /// Normalized address
    pub email: &'a str,
    pub password_hash: &'a str,
    pub display_name: &'a str,
    pub verification_digest: &'a str,
    pub verification_expires_at: chrono::DateTime<chrono::Utc>,
    pub roles: &'a [crate::auth::rbac::Role],
}

/// Which single-use link table a token belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkPurpose {
    PasswordReset,
    EmailVerification,
}

/// Row counts reported by the health endpoint
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct DatabaseStats {
    pub users: u64,
    pub customers: u64,
    pub appointments: u64,
}
