//! Test suite for glowdesk
//!
//! ## Test Categories
//!
//! ### 1. Common Utilities (`common/`)
//! - In-memory SQLite database and fully wired services
//! - Account factories
//!
//! ### 2. Integration Tests (`integration/`)
//! End-to-end flows across sessions, guards, screens and the salon services,
//! all against a real in-memory database.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test                 # everything
//! cargo test --lib           # unit tests only
//! cargo test --test lib      # integration tests only
//! ```

pub mod common;
pub mod integration;
