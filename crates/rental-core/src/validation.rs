//! # Validation Module
//!
//! Input validation for registration and fleet management.
//!
//! ## Validation Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Layer 1: Console shell (dialoguer)                                    │
//! │  ├── Typed prompts, password confirmation                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: RentalService                                                │
//! │  └── THIS MODULE: business rule validation                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: SQLite                                                       │
//! │  ├── NOT NULL / UNIQUE(username)                                       │
//! │  └── FOREIGN KEY (car_id, customer_name)                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::{MAX_DAILY_RATE_CENTS, MAX_RENTAL_DAYS, MIN_PASSWORD_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Identity Validators
// =============================================================================

/// Validates a username.
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - No whitespace
///
/// ```rust
/// use rental_core::validation::validate_username;
///
/// assert!(validate_username("customer").is_ok());
/// assert!(validate_username("").is_err());
/// assert!(validate_username("two words").is_err());
/// ```
pub fn validate_username(username: &str) -> ValidationResult<()> {
    if username.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "username".to_string(),
        });
    }

    if username.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "username".to_string(),
            max: 50,
        });
    }

    if username.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidFormat {
            field: "username".to_string(),
            reason: "must not contain spaces".to_string(),
        });
    }

    Ok(())
}

/// Validates a new password (length only; it is hashed right after).
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }

    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: MIN_PASSWORD_LEN,
        });
    }

    Ok(())
}

/// Validates an email address.
///
/// ## Rules
/// A single `@` with a non-empty local part and a dotted domain.
/// Deliverability is the mail server's problem.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    let invalid = || ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: "expected name@domain.tld".to_string(),
    };

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty()
        || domain.contains('@')
        || email.chars().any(char::is_whitespace)
        || !domain.contains('.')
        || domain.starts_with('.')
        || domain.ends_with('.')
    {
        return Err(invalid());
    }

    Ok(())
}

// =============================================================================
// Fleet Validators
// =============================================================================

/// Validates a car make or model name.
pub fn validate_car_name(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.len() > 50 {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: 50,
        });
    }

    Ok(())
}

/// Validates a manufacture year.
pub fn validate_year(year: i32) -> ValidationResult<()> {
    if !(1900..=2100).contains(&year) {
        return Err(ValidationError::OutOfRange {
            field: "year".to_string(),
            min: 1900,
            max: 2100,
        });
    }

    Ok(())
}

/// Validates an odometer reading.
pub fn validate_mileage(mileage: i64) -> ValidationResult<()> {
    if mileage < 0 {
        return Err(ValidationError::OutOfRange {
            field: "mileage".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a daily rate in cents.
///
/// ## Rules
/// `0 < cents <= MAX_DAILY_RATE_CENTS`
pub fn validate_rate_cents(cents: i64) -> ValidationResult<()> {
    if cents <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "daily rate".to_string(),
        });
    }

    if cents > MAX_DAILY_RATE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "daily rate (cents)".to_string(),
            min: 1,
            max: MAX_DAILY_RATE_CENTS,
        });
    }

    Ok(())
}

/// Validates a car's rental window.
///
/// ## Rules
/// `1 <= min_days <= max_days <= MAX_RENTAL_DAYS`
pub fn validate_rental_window(min_days: i32, max_days: i32) -> ValidationResult<()> {
    if min_days < 1 || min_days > MAX_RENTAL_DAYS {
        return Err(ValidationError::OutOfRange {
            field: "minimum rental days".to_string(),
            min: 1,
            max: MAX_RENTAL_DAYS as i64,
        });
    }

    if max_days < min_days || max_days > MAX_RENTAL_DAYS {
        return Err(ValidationError::OutOfRange {
            field: "maximum rental days".to_string(),
            min: min_days as i64,
            max: MAX_RENTAL_DAYS as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_username() {
        assert!(validate_username("admin").is_ok());
        assert!(validate_username("jane_doe").is_ok());

        assert!(validate_username("").is_err());
        assert!(validate_username("   ").is_err());
        assert!(validate_username("jane doe").is_err());
        assert!(validate_username(&"a".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("cust123").is_ok());
        assert!(validate_password("123456").is_ok());
        assert!(matches!(
            validate_password("12345"),
            Err(ValidationError::TooShort { min: 6, .. })
        ));
        assert!(matches!(
            validate_password(""),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("customer@example.com").is_ok());
        assert!(validate_email("a.b@mail.co.uk").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("a@b@c.com").is_err());
        assert!(validate_email("a@localhost").is_err());
        assert!(validate_email("a @b.com").is_err());
    }

    #[test]
    fn test_validate_year_and_mileage() {
        assert!(validate_year(2020).is_ok());
        assert!(validate_year(1899).is_err());
        assert!(validate_mileage(0).is_ok());
        assert!(validate_mileage(-1).is_err());
    }

    #[test]
    fn test_validate_rate_cents() {
        assert!(validate_rate_cents(4599).is_ok());
        assert!(validate_rate_cents(0).is_err());
        assert!(validate_rate_cents(-100).is_err());

        assert!(validate_rate_cents(MAX_DAILY_RATE_CENTS).is_ok());
        assert!(matches!(
            validate_rate_cents(MAX_DAILY_RATE_CENTS + 1),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_validate_rental_window() {
        assert!(validate_rental_window(1, 15).is_ok());
        assert!(validate_rental_window(3, 3).is_ok());

        assert!(validate_rental_window(0, 10).is_err());
        assert!(validate_rental_window(5, 4).is_err());
        assert!(validate_rental_window(1, MAX_RENTAL_DAYS + 1).is_err());
    }
}
