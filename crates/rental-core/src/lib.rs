//! # rental-core: Pure Business Logic for the Car Rental Desk
//!
//! This crate holds the rules of the rental domain as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Car Rental Desk Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Console Shell (dialoguer)                    │   │
//! │  │     Auth Menu ──► Admin Menu / Customer Menu ──► Bill Export    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    RentalService (rental-cli)                   │   │
//! │  │      register, login, book_car, decide_booking, generate_bill   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ rental-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   bill    │  │ validation│  │   │
//! │  │   │ Car, User │  │   Money   │  │   Bill    │  │   rules   │  │   │
//! │  │   │  Booking  │  │  TaxRate  │  │  Totals   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                   rental-db (Database Layer)                    │   │
//! │  │            SQLite queries, migrations, repositories             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (User, Car, Booking, Role, BookingStatus)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`bill`] - Bill computation and rendering
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use rental_core::bill::BillTotals;
//! use rental_core::money::Money;
//! use rental_core::BILL_TAX_RATE;
//!
//! // 3 days at $45.99/day, 10% tax
//! let totals = BillTotals::compute(3, Money::from_cents(4599), BILL_TAX_RATE).unwrap();
//! assert_eq!(totals.subtotal.cents(), 13797);
//! assert_eq!(totals.tax.cents(), 1380);
//! assert_eq!(totals.total.cents(), 15177);
//! ```

pub mod bill;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

pub use bill::{Bill, BillTotals};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Tax applied to every rental bill: 10% (1000 basis points).
pub const BILL_TAX_RATE: TaxRate = TaxRate::from_bps(1000);

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Upper bound for any car's `max_days`.
///
/// ## Business Reason
/// Rentals longer than a year are leases, handled outside this desk.
pub const MAX_RENTAL_DAYS: i32 = 365;

/// Upper bound for a car's daily rate: $100,000.00.
///
/// With `MAX_RENTAL_DAYS` this keeps every fee and bill total far below
/// `i64::MAX` cents.
pub const MAX_DAILY_RATE_CENTS: i64 = 10_000_000;
