//! Common test utilities for glowdesk
//!
//! - [`TestDatabase`]: isolated in-memory SQLite instances
//! - [`TestApp`]: identity, resolver and salon services wired on top of one
//! - [`fixtures`]: account factories

pub mod database;
pub mod fixtures;

pub use database::{TestApp, TestDatabase};
pub use fixtures::{PASSWORD, TestAccount};
