//! Domain models

pub mod status;

pub use status::*;
