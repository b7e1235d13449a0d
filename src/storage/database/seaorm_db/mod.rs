// Module declarations
mod connection;
mod role_ops;
mod salon_ops;
mod session_ops;
mod token_ops;
mod types;
mod user_ops;

// Re-export public types
pub use salon_ops::CancellationRecord;
pub use types::{DatabaseBackendType, DatabaseStats, LinkPurpose, NewAccount, SeaOrmDatabase};
