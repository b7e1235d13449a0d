//! Validation trait definition

/// Validation trait for configuration structures
///
/// Errors are plain messages; the caller wraps them into a configuration
/// error naming the section.
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}
