//! Field validators shared by the entity crates.
//!
//! Every function returns the normalized value on success so constructors and
//! setters can validate and assign in one expression.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{DomainError, DomainResult};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@]+@[^@]+\.[^@]+$").expect("email pattern is a valid regex")
});

/// Non-empty (after trimming) text of at most `max` characters.
pub fn required_text(field: &str, value: &str, max: usize) -> DomainResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{field} cannot be empty")));
    }
    if trimmed.chars().count() > max {
        return Err(DomainError::validation(format!(
            "{field} must be {max} characters max"
        )));
    }
    Ok(trimmed.to_string())
}

/// Non-empty (after trimming) text with no length limit.
pub fn non_empty_text(field: &str, value: &str) -> DomainResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{field} cannot be empty")));
    }
    Ok(trimmed.to_string())
}

/// Syntactically plausible email (`local@domain.tld`), lower-cased.
pub fn email(value: &str) -> DomainResult<String> {
    let trimmed = value.trim();
    if !EMAIL_RE.is_match(trimmed) {
        return Err(DomainError::validation("Invalid email format"));
    }
    Ok(trimmed.to_lowercase())
}

/// Finite float within `[min, max]` (inclusive).
pub fn float_between(field: &str, value: f64, min: f64, max: f64) -> DomainResult<f64> {
    if !value.is_finite() {
        return Err(DomainError::validation(format!("{field} must be a finite number")));
    }
    if value < min || value > max {
        return Err(DomainError::validation(format!(
            "{field} must be between {min} and {max}"
        )));
    }
    Ok(value)
}

/// Finite float greater than or equal to zero.
pub fn non_negative(field: &str, value: f64) -> DomainResult<f64> {
    if !value.is_finite() {
        return Err(DomainError::validation(format!("{field} must be a finite number")));
    }
    if value < 0.0 {
        return Err(DomainError::validation(format!("{field} must be non-negative")));
    }
    Ok(value)
}

/// Integer within `[min, max]` (inclusive).
pub fn int_between(field: &str, value: i64, min: i64, max: i64) -> DomainResult<i64> {
    if value < min || value > max {
        return Err(DomainError::validation(format!(
            "{field} must be between {min} and {max}"
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_trims_and_limits() {
        assert_eq!(required_text("Name", "  Wifi ", 50).unwrap(), "Wifi");
        assert!(required_text("Name", "   ", 50).is_err());
        assert!(required_text("Name", &"a".repeat(51), 50).is_err());
        assert!(required_text("Name", &"a".repeat(50), 50).is_ok());
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let accented = "é".repeat(50);
        assert!(required_text("Name", &accented, 50).is_ok());
    }

    #[test]
    fn email_pattern_is_permissive() {
        assert_eq!(email("Alice@Example.com").unwrap(), "alice@example.com");
        assert!(email("a@b.c").is_ok());
        assert!(email("no-at-sign.com").is_err());
        assert!(email("a@nodot").is_err());
        assert!(email("a@@b.com").is_err());
    }

    #[test]
    fn floats_reject_nan_and_infinity() {
        assert!(float_between("latitude", f64::NAN, -90.0, 90.0).is_err());
        assert!(non_negative("price", f64::INFINITY).is_err());
        assert_eq!(non_negative("price", 0.0).unwrap(), 0.0);
    }
}
