//! # Application Error Type
//!
//! Unified error type for service operations and the console shell.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Menu action                                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  RentalService::book_car(..) -> AppResult<Booking>                      │
//! │       │                                                                 │
//! │       ├── ValidationError ─┐                                            │
//! │       ├── CoreError ───────┼──► AppError { code, message }              │
//! │       └── DbError ─────────┘          │                                 │
//! │                                       ▼                                 │
//! │  Shell prints "❌ {message}" and returns to the menu                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Database internals are logged and replaced by a generic message; the
//! console only ever shows text meant for the person at the keyboard.

use rental_core::{CoreError, ValidationError};
use rental_db::DbError;
use std::fmt;

/// Error returned by every service operation.
#[derive(Debug, Clone)]
pub struct AppError {
    /// Machine-readable category
    pub code: ErrorCode,

    /// Human-readable message for display
    pub message: String,
}

/// Error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Car, booking or user does not exist
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Rule of the rental workflow refused the action
    BusinessLogic,

    /// Role does not permit the action
    Forbidden,

    /// Registration could not complete (e.g. username taken)
    RegistrationFailed,

    /// State changed between read and write
    Conflict,

    /// Database operation failed
    DatabaseError,

    /// Local file could not be written
    Io,

    /// Internal error
    Internal,
}

impl AppError {
    /// Creates a new error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: impl fmt::Display) -> Self {
        AppError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }

    /// The one message shown for any failed registration.
    pub fn registration_failed() -> Self {
        AppError::new(
            ErrorCode::RegistrationFailed,
            "Registration failed. Try a different username.",
        )
    }
}

/// Converts database errors to application errors.
impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => AppError::not_found(&entity, id),
            DbError::UniqueViolation { field, value } => AppError::new(
                ErrorCode::ValidationError,
                format!("{} '{}' already exists", field, value),
            ),
            DbError::ForeignKeyViolation { message } => {
                tracing::warn!("Foreign key violation: {}", message);
                AppError::new(ErrorCode::BusinessLogic, "Record is referenced elsewhere")
            }
            DbError::StaleState {
                entity,
                id,
                expected,
            } => AppError::new(
                ErrorCode::Conflict,
                format!("{} {} is no longer {}", entity, id, expected),
            ),
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Database migration failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                tracing::error!("Database query failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::PoolExhausted => {
                AppError::new(ErrorCode::DatabaseError, "Database is busy, try again")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to application errors.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::CarNotFound(_)
            | CoreError::BookingNotFound(_)
            | CoreError::UserNotFound(_) => ErrorCode::NotFound,
            CoreError::CarUnavailable(_)
            | CoreError::RentalDaysOutOfRange { .. }
            | CoreError::InvalidBookingStatus { .. }
            | CoreError::BillRequiresApproval { .. }
            | CoreError::FeeOverflow { .. } => ErrorCode::BusinessLogic,
            CoreError::Forbidden { .. } => ErrorCode::Forbidden,
            CoreError::Validation(e) => return AppError::validation(e.to_string()),
        };
        AppError::new(code, err.to_string())
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::new(ErrorCode::Io, format!("File error: {}", err))
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for AppError {}

/// Result type for service operations.
pub type AppResult<T> = Result<T, AppError>;
