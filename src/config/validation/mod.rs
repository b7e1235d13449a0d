//! Configuration validation
//!
//! This module provides validation logic for all configuration structures.
//!
//! - `trait_def`: the `Validate` trait
//! - `validators`: implementations for every configuration section
//! - `tests`: test suite for all validators

mod tests;
mod trait_def;
mod validators;

pub use trait_def::Validate;
