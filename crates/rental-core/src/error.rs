//! # Error Types
//!
//! Domain-specific error types for rental-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  rental-core errors (this file)                                        │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  rental-db errors (separate crate)                                     │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  rental-cli errors (app)                                               │
//! │  └── AppError         - What the console prints                        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AppError → Console                │
//! │                          DbError   ↗                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations in the rental domain.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No car with this id exists.
    #[error("Car not found: {0}")]
    CarNotFound(i64),

    /// Car exists but is already rented out.
    ///
    /// ## When This Occurs
    /// - Booking a car whose availability flag is false
    /// - Approving a second booking after the car was already rented
    #[error("Car {0} is not available")]
    CarUnavailable(i64),

    /// No booking with this id exists.
    #[error("Booking not found: {0}")]
    BookingNotFound(i64),

    /// No user with this username exists.
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// Requested rental length falls outside the car's allowed window.
    ///
    /// ## User Workflow
    /// ```text
    /// Book car #4 for 20 days
    ///      │
    ///      ▼
    /// Car #4 allows 3..=12 days
    ///      │
    ///      ▼
    /// RentalDaysOutOfRange { days: 20, min: 3, max: 12 }
    ///      │
    ///      ▼
    /// Shell: "Choose between 3 and 12 days"
    /// ```
    #[error("Rental of {days} days is out of the allowed range: choose between {min} and {max} days")]
    RentalDaysOutOfRange { days: i32, min: i32, max: i32 },

    /// Booking is not in a state that allows the requested transition.
    ///
    /// ## When This Occurs
    /// - Approving or rejecting a booking that was already decided
    #[error("Booking {booking_id} is {current_status}, cannot perform operation")]
    InvalidBookingStatus {
        booking_id: i64,
        current_status: String,
    },

    /// `days × rate` (plus tax) does not fit in i64 cents.
    #[error("Fee for {days} days at {rate_cents} cents/day is too large")]
    FeeOverflow { days: i32, rate_cents: i64 },

    /// Bill requested for a booking that is not approved.
    #[error("Bill can only be generated for approved bookings (booking {booking_id} is {status})")]
    BillRequiresApproval { booking_id: i64, status: String },

    /// The session's role does not permit this action.
    #[error("Not permitted: {action}")]
    Forbidden { action: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates a Forbidden error for the given action.
    pub fn forbidden(action: impl Into<String>) -> Self {
        CoreError::Forbidden {
            action: action.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any business logic or database access runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., bad email, unparseable amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_out_of_range_message() {
        let err = CoreError::RentalDaysOutOfRange {
            days: 20,
            min: 3,
            max: 12,
        };
        assert_eq!(
            err.to_string(),
            "Rental of 20 days is out of the allowed range: choose between 3 and 12 days"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "username".to_string(),
        };
        assert_eq!(err.to_string(), "username is required");

        let err = ValidationError::TooShort {
            field: "password".to_string(),
            min: 6,
        };
        assert_eq!(err.to_string(), "password must be at least 6 characters");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "email".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
