//! Integration tests for glowdesk
//!
//! Each suite runs real services against an in-memory database; nothing is
//! mocked except e-mail delivery, which lands in an outbox.

pub mod access_tests;
pub mod cancellation_tests;
pub mod screen_tests;
pub mod session_flow_tests;
