//! Error handling for GlowDesk
//!
//! This module defines the error type used throughout the crate, its HTTP
//! mapping, and the mapping to user-facing notices.

#![allow(missing_docs)]

mod helpers;
mod response;
#[cfg(test)]
mod tests;
mod types;

pub use response::{ErrorDetail, ErrorResponse};
pub use types::{GlowError, Result};
