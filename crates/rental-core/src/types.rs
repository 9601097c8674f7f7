//! # Domain Types
//!
//! Core domain types used throughout the rental desk.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      User       │   │       Car       │   │     Booking     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  username (UQ)  │◄┐ │  make / model   │◄──│  car_id (FK)    │       │
//! │  │  password_hash  │ └─│  rate_cents     │   │  customer (FK)  │       │
//! │  │  role, email    │   │  available      │   │  status         │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Role       │   │  BookingStatus  │   │    Decision     │       │
//! │  │  Admin          │   │  Pending        │   │  Approve        │       │
//! │  │  Customer       │   │  Approved       │   │  Reject         │       │
//! │  └─────────────────┘   │  Rejected       │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::validation;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so 1000 bps = 10%.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Formats the rate for display, e.g. `10%` or `8.25%`.
    pub fn display_percent(&self) -> String {
        if self.0 % 100 == 0 {
            format!("{}%", self.0 / 100)
        } else {
            format!("{}.{:02}%", self.0 / 100, self.0 % 100)
        }
    }
}

// =============================================================================
// Role
// =============================================================================

/// Access role of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
pub enum Role {
    /// Manages the fleet and decides bookings.
    Admin,
    /// Books cars and views own bills.
    Customer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Customer => "customer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "customer" => Ok(Role::Customer),
            _ => Err(ValidationError::NotAllowed {
                field: "role".to_string(),
                allowed: vec!["admin".to_string(), "customer".to_string()],
            }),
        }
    }
}

// =============================================================================
// User
// =============================================================================

/// A registered account.
///
/// Immutable after registration: there is no update or delete path.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub username: String,
    /// PHC-format salted hash. Never shown or logged.
    pub password_hash: String,
    pub role: Role,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// An authenticated console session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub username: String,
    pub role: Role,
}

impl Session {
    pub fn new(username: impl Into<String>, role: Role) -> Self {
        Session {
            username: username.into(),
            role,
        }
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Fails with `Forbidden` unless the session belongs to an admin.
    pub fn require_admin(&self, action: &str) -> CoreResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(CoreError::forbidden(action))
        }
    }
}

// =============================================================================
// Car
// =============================================================================

/// A car in the rental fleet.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Car {
    pub id: i64,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub mileage: i64,
    /// Daily rental rate in cents.
    pub rate_cents: i64,
    pub min_days: i32,
    pub max_days: i32,
    /// False once a booking on this car has been approved.
    pub available: bool,
}

impl Car {
    /// Returns the daily rate as Money.
    #[inline]
    pub fn rate(&self) -> Money {
        Money::from_cents(self.rate_cents)
    }

    /// `Make Model (Year)`, as printed on bills and emails.
    pub fn description(&self) -> String {
        format!("{} {} ({})", self.make, self.model, self.year)
    }

    /// Checks that `days` lies within this car's rental window.
    pub fn check_rental_days(&self, days: i32) -> CoreResult<()> {
        if days < self.min_days || days > self.max_days {
            return Err(CoreError::RentalDaysOutOfRange {
                days,
                min: self.min_days,
                max: self.max_days,
            });
        }
        Ok(())
    }

    /// Fee for renting this car `days` days at its current rate.
    pub fn rental_fee(&self, days: i32) -> CoreResult<Money> {
        self.rate()
            .multiply_days(days)
            .ok_or(CoreError::FeeOverflow {
                days,
                rate_cents: self.rate_cents,
            })
    }

    /// Checks the car can be newly booked for `days`.
    pub fn check_bookable(&self, days: i32) -> CoreResult<()> {
        if !self.available {
            return Err(CoreError::CarUnavailable(self.id));
        }
        self.check_rental_days(days)
    }
}

impl fmt::Display for Car {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {} ({}) | Mileage: {} | Rate: {} | Rental Days: {}-{} | {}",
            self.id,
            self.make,
            self.model,
            self.year,
            self.mileage,
            self.rate(),
            self.min_days,
            self.max_days,
            if self.available { "Available" } else { "Rented" }
        )
    }
}

/// Attributes for a car about to be added to the fleet.
#[derive(Debug, Clone)]
pub struct NewCar {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub mileage: i64,
    pub rate_cents: i64,
    pub min_days: i32,
    pub max_days: i32,
}

impl NewCar {
    /// Validates every attribute and trims the text fields.
    pub fn validated(mut self) -> Result<Self, ValidationError> {
        self.make = self.make.trim().to_string();
        self.model = self.model.trim().to_string();
        validation::validate_car_name("make", &self.make)?;
        validation::validate_car_name("model", &self.model)?;
        validation::validate_year(self.year)?;
        validation::validate_mileage(self.mileage)?;
        validation::validate_rate_cents(self.rate_cents)?;
        validation::validate_rental_window(self.min_days, self.max_days)?;
        Ok(self)
    }
}

// =============================================================================
// Booking Status
// =============================================================================

/// Status of a booking.
///
/// ```text
///            ┌──► Approved (terminal)
/// Pending ───┤
///            └──► Rejected (terminal)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
pub enum BookingStatus {
    Pending,
    Approved,
    Rejected,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Approved => "approved",
            BookingStatus::Rejected => "rejected",
        }
    }

    /// Applies an admin decision to a booking in this status.
    ///
    /// Only `Pending` accepts a decision; both outcomes are terminal.
    pub fn decide(self, booking_id: i64, decision: Decision) -> CoreResult<BookingStatus> {
        match self {
            BookingStatus::Pending => Ok(decision.outcome()),
            other => Err(CoreError::InvalidBookingStatus {
                booking_id,
                current_status: other.as_str().to_string(),
            }),
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An admin's verdict on a pending booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    /// The status a pending booking moves to under this decision.
    pub fn outcome(&self) -> BookingStatus {
        match self {
            Decision::Approve => BookingStatus::Approved,
            Decision::Reject => BookingStatus::Rejected,
        }
    }
}

// =============================================================================
// Booking
// =============================================================================

/// A customer's request to rent a car.
///
/// Uses the snapshot pattern: `rate_cents` and `total_fee_cents` are frozen
/// at creation and never recalculated, even if the car's rate changes later.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Booking {
    pub id: i64,
    pub car_id: i64,
    pub customer_name: String,
    pub days: i32,
    /// Car's daily rate at booking time (frozen).
    pub rate_cents: i64,
    /// `days × rate_cents` (frozen).
    pub total_fee_cents: i64,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub decided_at: Option<DateTime<Utc>>,
}

impl Booking {
    #[inline]
    pub fn total_fee(&self) -> Money {
        Money::from_cents(self.total_fee_cents)
    }

    #[inline]
    pub fn rate(&self) -> Money {
        Money::from_cents(self.rate_cents)
    }
}

impl fmt::Display for Booking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} → Car ID {} | {} days | Status: {} | Fee: {}",
            self.id,
            self.customer_name,
            self.car_id,
            self.days,
            self.status,
            self.total_fee()
        )
    }
}

/// Which bookings a listing should return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingFilter {
    All,
    Customer(String),
    Pending,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn camry(available: bool) -> Car {
        Car {
            id: 1,
            make: "Toyota".to_string(),
            model: "Camry".to_string(),
            year: 2020,
            mileage: 35000,
            rate_cents: 4599,
            min_days: 1,
            max_days: 15,
            available,
        }
    }

    #[test]
    fn test_role_parse() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(" Customer ".parse::<Role>().unwrap(), Role::Customer);
        assert!("manager".parse::<Role>().is_err());
    }

    #[test]
    fn test_session_admin_gate() {
        assert!(Session::new("root", Role::Admin).require_admin("add car").is_ok());
        let err = Session::new("jo", Role::Customer)
            .require_admin("add car")
            .unwrap_err();
        assert!(matches!(err, CoreError::Forbidden { .. }));
    }

    #[test]
    fn test_rental_window_bounds_are_inclusive() {
        let car = camry(true);
        assert!(car.check_bookable(1).is_ok());
        assert!(car.check_bookable(15).is_ok());
        assert!(matches!(
            car.check_bookable(0),
            Err(CoreError::RentalDaysOutOfRange { min: 1, max: 15, .. })
        ));
        assert!(car.check_bookable(16).is_err());
    }

    #[test]
    fn test_rented_car_is_not_bookable() {
        let car = camry(false);
        assert!(matches!(car.check_bookable(3), Err(CoreError::CarUnavailable(1))));
    }

    #[test]
    fn test_car_display() {
        assert_eq!(
            camry(true).to_string(),
            "[1] Toyota Camry (2020) | Mileage: 35000 | Rate: $45.99 | Rental Days: 1-15 | Available"
        );
    }

    #[test]
    fn test_decide_from_pending() {
        let status = BookingStatus::Pending;
        assert_eq!(status.decide(7, Decision::Approve).unwrap(), BookingStatus::Approved);
        assert_eq!(status.decide(7, Decision::Reject).unwrap(), BookingStatus::Rejected);
    }

    #[test]
    fn test_decided_bookings_are_terminal() {
        for status in [BookingStatus::Approved, BookingStatus::Rejected] {
            let err = status.decide(7, Decision::Approve).unwrap_err();
            assert!(matches!(err, CoreError::InvalidBookingStatus { booking_id: 7, .. }));
        }
    }

    #[test]
    fn test_tax_rate_display() {
        assert_eq!(TaxRate::from_bps(1000).display_percent(), "10%");
        assert_eq!(TaxRate::from_bps(825).display_percent(), "8.25%");
    }

    #[test]
    fn test_new_car_validation_trims_and_checks() {
        let car = NewCar {
            make: "  Kia ".to_string(),
            model: "Forte".to_string(),
            year: 2021,
            mileage: 18000,
            rate_cents: 4200,
            min_days: 1,
            max_days: 12,
        }
        .validated()
        .unwrap();
        assert_eq!(car.make, "Kia");

        let bad = NewCar {
            min_days: 5,
            max_days: 2,
            ..car
        };
        assert!(bad.validated().is_err());
    }

    #[test]
    fn test_new_car_rejects_rate_above_limit() {
        let car = NewCar {
            make: "Rolls-Royce".to_string(),
            model: "Phantom".to_string(),
            year: 2023,
            mileage: 100,
            rate_cents: Money::parse("50000000000000000").unwrap().cents(),
            min_days: 1,
            max_days: 5,
        };
        assert!(matches!(
            car.validated(),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_rental_fee() {
        assert_eq!(camry(true).rental_fee(3).unwrap().cents(), 13797);

        let corrupt = Car {
            rate_cents: i64::MAX,
            ..camry(true)
        };
        assert!(matches!(
            corrupt.rental_fee(2),
            Err(CoreError::FeeOverflow { days: 2, .. })
        ));
    }
}
