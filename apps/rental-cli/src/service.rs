//! # Rental Service
//!
//! The one object the console talks to. Each method is one user action:
//! it checks the session's role, applies the domain rules from
//! `rental-core`, performs the storage work through `rental-db`, and sends
//! any customer email.
//!
//! ## Booking Lifecycle
//! ```text
//! customer: book_car ──► Booking { status: pending }   ──► "Booking Received" email
//!                              │
//!          admin: decide_booking
//!              ┌───────────────┴───────────────┐
//!              ▼                               ▼
//!      approved + car rented           rejected (car untouched)
//!      "Booking Approved" email
//!              │
//!              ▼
//!      generate_bill ──► export_bill ──► bill_booking_{id}.txt
//! ```

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use rental_core::validation;
use rental_core::{
    Bill, Booking, BookingFilter, Car, CoreError, Decision, Money, NewCar, Role, Session, User,
};
use rental_db::{Database, DbError, NewBookingRecord, NewUserRecord};

use crate::auth::{self, PasswordCheck};
use crate::error::{AppError, AppResult, ErrorCode};
use crate::notify::Notifier;

/// Result of a login attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Authenticated(Session),
    /// Unknown username or wrong password; the two are not distinguished.
    Rejected,
    /// The stored hash for this user cannot be read. Re-registering fixes it.
    MalformedCredential,
}

/// Car rental operations.
pub struct RentalService {
    db: Database,
    notifier: Box<dyn Notifier>,
    export_dir: PathBuf,
}

impl RentalService {
    pub fn new(db: Database, notifier: Box<dyn Notifier>, export_dir: impl Into<PathBuf>) -> Self {
        RentalService {
            db,
            notifier,
            export_dir: export_dir.into(),
        }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    // =========================================================================
    // Identity
    // =========================================================================

    /// Creates an account.
    ///
    /// ## Errors
    /// - `ValidationError` for a blank field, a short password or a bad email
    /// - `RegistrationFailed` when the username is taken
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        role: Role,
        email: &str,
    ) -> AppResult<User> {
        let username = username.trim();
        let email = email.trim();

        validation::validate_username(username)?;
        validation::validate_password(password)?;
        validation::validate_email(email)?;

        let record = NewUserRecord {
            username: username.to_string(),
            password_hash: auth::hash_password(password)?,
            role,
            email: email.to_string(),
        };

        let user = match self.db.users().insert(&record).await {
            Ok(user) => user,
            Err(DbError::UniqueViolation { .. }) => {
                debug!(username, "Registration refused: username taken");
                return Err(AppError::registration_failed());
            }
            Err(e) => return Err(e.into()),
        };

        info!(username = %user.username, role = %user.role, "User registered");
        Ok(user)
    }

    /// Checks a username and password.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<LoginOutcome> {
        let Some(user) = self.db.users().get_by_username(username.trim()).await? else {
            debug!("Login rejected");
            return Ok(LoginOutcome::Rejected);
        };

        let outcome = match auth::verify_password(password, &user.password_hash) {
            PasswordCheck::Verified => {
                info!(username = %user.username, role = %user.role, "User logged in");
                LoginOutcome::Authenticated(Session::new(user.username, user.role))
            }
            PasswordCheck::Mismatch => {
                debug!("Login rejected");
                LoginOutcome::Rejected
            }
            PasswordCheck::Malformed => {
                warn!(username = %user.username, "Stored password hash is unreadable");
                LoginOutcome::MalformedCredential
            }
        };

        Ok(outcome)
    }

    // =========================================================================
    // Inventory
    // =========================================================================

    /// Adds a car to the fleet (admin).
    pub async fn add_car(&self, session: &Session, car: NewCar) -> AppResult<Car> {
        session.require_admin("add cars")?;

        let car = self.db.cars().insert(&car.validated()?).await?;

        info!(car_id = car.id, car = %car.description(), "Car added");
        Ok(car)
    }

    /// Sets a car's mileage and daily rate (admin).
    pub async fn update_car(
        &self,
        session: &Session,
        car_id: i64,
        mileage: i64,
        rate: Money,
    ) -> AppResult<Car> {
        session.require_admin("update cars")?;

        validation::validate_mileage(mileage)?;
        validation::validate_rate_cents(rate.cents())?;

        match self
            .db
            .cars()
            .update_mileage_and_rate(car_id, mileage, rate.cents())
            .await
        {
            Ok(()) => {}
            Err(DbError::NotFound { .. }) => return Err(CoreError::CarNotFound(car_id).into()),
            Err(e) => return Err(e.into()),
        }

        info!(car_id, mileage, rate = %rate, "Car updated");
        self.get_car(car_id).await
    }

    /// Removes a car from the fleet (admin).
    ///
    /// Refused while any booking references the car.
    pub async fn delete_car(&self, session: &Session, car_id: i64) -> AppResult<()> {
        session.require_admin("delete cars")?;

        match self.db.cars().delete(car_id).await {
            Ok(()) => {
                info!(car_id, "Car deleted");
                Ok(())
            }
            Err(DbError::NotFound { .. }) => Err(CoreError::CarNotFound(car_id).into()),
            Err(DbError::ForeignKeyViolation { .. }) => Err(AppError::new(
                ErrorCode::BusinessLogic,
                format!("Car {} has bookings and cannot be deleted", car_id),
            )),
            Err(e) => Err(e.into()),
        }
    }

    /// Cars that can be booked, ordered by id.
    pub async fn available_cars(&self) -> AppResult<Vec<Car>> {
        Ok(self.db.cars().list_available().await?)
    }

    /// Looks up one car, rented or not.
    pub async fn get_car(&self, car_id: i64) -> AppResult<Car> {
        self.db
            .cars()
            .get_by_id(car_id)
            .await?
            .ok_or_else(|| CoreError::CarNotFound(car_id).into())
    }

    // =========================================================================
    // Bookings
    // =========================================================================

    /// Requests a car for `days` days in the session user's name.
    ///
    /// ## Errors
    /// - `NotFound` for an unknown car or user
    /// - `BusinessLogic` when the car is rented or `days` is out of range
    ///
    /// Nothing is written when a rule fails.
    pub async fn book_car(&self, session: &Session, car_id: i64, days: i32) -> AppResult<Booking> {
        let customer = session.username.as_str();

        let email = self
            .db
            .users()
            .email_for(customer)
            .await?
            .ok_or_else(|| CoreError::UserNotFound(customer.to_string()))?;

        let car = self.get_car(car_id).await?;
        car.check_bookable(days)?;

        let fee = car.rental_fee(days)?;
        let booking = self
            .db
            .bookings()
            .insert_pending(&NewBookingRecord {
                car_id,
                customer_name: customer.to_string(),
                days,
                rate_cents: car.rate_cents,
                total_fee_cents: fee.cents(),
            })
            .await?;

        info!(booking_id = booking.id, car_id, customer, days, fee = %fee, "Booking created");

        let (subject, body) = booking_received_email(customer, &car, days, fee);
        self.notify(&email, &subject, &body).await;

        Ok(booking)
    }

    /// Lists bookings. Customers may only list their own.
    pub async fn list_bookings(
        &self,
        session: &Session,
        filter: BookingFilter,
    ) -> AppResult<Vec<Booking>> {
        if !session.is_admin() {
            match &filter {
                BookingFilter::Customer(name) if *name == session.username => {}
                _ => return Err(CoreError::forbidden("view other customers' bookings").into()),
            }
        }

        Ok(self.db.bookings().list(&filter).await?)
    }

    /// Bookings awaiting a decision (admin).
    pub async fn pending_bookings(&self, session: &Session) -> AppResult<Vec<Booking>> {
        session.require_admin("review pending bookings")?;
        Ok(self.db.bookings().list(&BookingFilter::Pending).await?)
    }

    /// Approves or rejects a pending booking (admin).
    ///
    /// Approval marks the car rented in the same transaction and emails the
    /// customer. A booking can be decided once.
    pub async fn decide_booking(
        &self,
        session: &Session,
        booking_id: i64,
        decision: Decision,
    ) -> AppResult<Booking> {
        session.require_admin("approve or reject bookings")?;

        let booking = self
            .db
            .bookings()
            .get_by_id(booking_id)
            .await?
            .ok_or(CoreError::BookingNotFound(booking_id))?;

        booking.status.decide(booking_id, decision)?;

        let car = self.get_car(booking.car_id).await?;
        if decision == Decision::Approve && !car.available {
            return Err(CoreError::CarUnavailable(car.id).into());
        }

        let decided = self
            .db
            .bookings()
            .apply_decision(booking_id, car.id, decision)
            .await?;

        if decision == Decision::Approve {
            match self.db.users().email_for(&decided.customer_name).await? {
                Some(email) => {
                    let (subject, body) = booking_approved_email(&decided, &car);
                    self.notify(&email, &subject, &body).await;
                }
                None => warn!(customer = %decided.customer_name, "No email on file"),
            }
        }

        Ok(decided)
    }

    /// Builds the bill for an approved booking.
    ///
    /// Customers may only bill their own bookings.
    pub async fn generate_bill(&self, session: &Session, booking_id: i64) -> AppResult<Bill> {
        let booking = self
            .db
            .bookings()
            .get_by_id(booking_id)
            .await?
            .ok_or(CoreError::BookingNotFound(booking_id))?;

        if !session.is_admin() && booking.customer_name != session.username {
            return Err(CoreError::forbidden("view another customer's bill").into());
        }

        let car = self.get_car(booking.car_id).await?;
        let bill = Bill::for_booking(&booking, &car)?;

        debug!(booking_id, total = %bill.totals.total, "Bill generated");
        Ok(bill)
    }

    /// Writes `bill` to `bill_booking_{id}.txt` in the export directory.
    pub async fn export_bill(&self, bill: &Bill) -> AppResult<PathBuf> {
        tokio::fs::create_dir_all(&self.export_dir).await?;

        let path = self.export_dir.join(bill.file_name());
        tokio::fs::write(&path, format!("{}\n", bill)).await?;

        info!(booking_id = bill.booking_id, path = %path.display(), "Bill saved");
        Ok(path)
    }

    async fn notify(&self, to: &str, subject: &str, body: &str) {
        if !self.notifier.send(to, subject, body).await {
            warn!(to, subject, "Notification not delivered");
        }
    }
}

// =============================================================================
// Email Content
// =============================================================================

fn booking_received_email(customer: &str, car: &Car, days: i32, fee: Money) -> (String, String) {
    let subject = "🧾Booking Received".to_string();
    let body = format!(
        "Hi {},\n\n\
         Your booking for {} {} is pending approval.\n\
         Rental days: {}\n\
         Estimated cost: {}\n\n\
         You'll receive a confirmation soon.",
        customer, car.make, car.model, days, fee
    );
    (subject, body)
}

fn booking_approved_email(booking: &Booking, car: &Car) -> (String, String) {
    let subject = "✅ Booking Approved".to_string();
    let body = format!(
        "Hi {},\n\n\
         Your booking for {} {} has been approved.\n\
         Rental Duration: {} days.\n\n\
         Thank you for choosing us!",
        booking.customer_name, car.make, car.model, booking.days
    );
    (subject, body)
}

// =============================================================================
// Unit Tests
// =============================================================================
