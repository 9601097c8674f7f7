//! # Repository Module
//!
//! SQL for each table lives in exactly one repository.
//!
//! ```text
//! RentalService
//!      │  db.bookings().apply_decision(id, car_id, Decision::Approve)
//!      ▼
//! BookingRepository ── one transaction ──► bookings + cars
//!      │
//!      ▼
//! SQLite
//! ```
//!
//! ## Available Repositories
//!
//! - [`user::UserRepository`] - Registration and credential lookup
//! - [`car::CarRepository`] - Fleet CRUD and availability
//! - [`booking::BookingRepository`] - Booking creation, listing and decisions

pub mod booking;
pub mod car;
pub mod user;
