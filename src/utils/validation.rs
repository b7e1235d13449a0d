//! Input validation helpers shared by the identity and booking flows

use crate::utils::error::{GlowError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

/// Trim and lowercase an e-mail address, rejecting malformed ones
pub fn normalize_email(email: &str) -> Result<String> {
    let email = email.trim().to_ascii_lowercase();
    if !EMAIL_PATTERN.is_match(&email) {
        return Err(GlowError::validation("invalid e-mail address"));
    }
    Ok(email)
}

/// Reject passwords shorter than `min_len` characters
pub fn check_password(password: &str, min_len: usize) -> Result<()> {
    if password.chars().count() < min_len {
        return Err(GlowError::validation(format!(
            "password must be at least {} characters",
            min_len
        )));
    }
    Ok(())
}

/// Require a non-blank field and return it trimmed
pub fn require(field: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(GlowError::validation(format!("{} is required", field)));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(
            normalize_email("  Jane.Doe@Salon.Example ").unwrap(),
            "jane.doe@salon.example"
        );
        assert!(normalize_email("jane@").is_err());
        assert!(normalize_email("").is_err());
    }

    #[test]
    fn test_check_password() {
        assert!(check_password("1234567", 8).is_err());
        assert!(check_password("12345678", 8).is_ok());
    }

    #[test]
    fn test_require_trims() {
        assert_eq!(require("name", "  Ana ").unwrap(), "Ana");
        assert!(require("name", "   ").is_err());
    }
}
