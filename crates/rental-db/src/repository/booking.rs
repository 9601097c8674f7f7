//! # Booking Repository
//!
//! Booking rows and the approval transaction.
//!
//! ## Decision Transaction
//! ```text
//! BEGIN
//!   UPDATE bookings SET status = 'approved'      WHERE id = ? AND status = 'pending'
//!        │ 0 rows → StaleState (already decided), rollback
//!        ▼
//!   UPDATE cars SET available = 0                WHERE id = ? AND available = 1
//!        │ 0 rows → StaleState (car already rented), rollback
//!        ▼
//! COMMIT
//! ```
//!
//! The `status = 'pending'` guard makes a decision apply exactly once even if
//! the caller's earlier read is stale. Rejection runs only the first update.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use rental_core::{Booking, BookingFilter, BookingStatus, Decision};

const BOOKING_COLUMNS: &str = "id, car_id, customer_name, days, rate_cents, total_fee_cents, \
                               status, created_at, decided_at";

/// A pending booking about to be inserted.
#[derive(Debug, Clone)]
pub struct NewBookingRecord {
    pub car_id: i64,
    pub customer_name: String,
    pub days: i32,
    /// Car's daily rate at booking time.
    pub rate_cents: i64,
    /// `days × rate_cents`.
    pub total_fee_cents: i64,
}

/// Repository for booking database operations.
#[derive(Debug, Clone)]
pub struct BookingRepository {
    pool: SqlitePool,
}

impl BookingRepository {
    /// Creates a new BookingRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BookingRepository { pool }
    }

    /// Inserts a booking in `pending` status.
    ///
    /// ## Returns
    /// * `Err(DbError::ForeignKeyViolation)` - Unknown car or customer
    pub async fn insert_pending(&self, record: &NewBookingRecord) -> DbResult<Booking> {
        debug!(
            car_id = record.car_id,
            customer = %record.customer_name,
            days = record.days,
            "Inserting booking"
        );

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO bookings (
                car_id, customer_name, days, rate_cents, total_fee_cents,
                status, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(record.car_id)
        .bind(&record.customer_name)
        .bind(record.days)
        .bind(record.rate_cents)
        .bind(record.total_fee_cents)
        .bind(BookingStatus::Pending)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(Booking {
            id: result.last_insert_rowid(),
            car_id: record.car_id,
            customer_name: record.customer_name.clone(),
            days: record.days,
            rate_cents: record.rate_cents,
            total_fee_cents: record.total_fee_cents,
            status: BookingStatus::Pending,
            created_at: now,
            decided_at: None,
        })
    }

    /// Gets a booking by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Booking>> {
        let booking = sqlx::query_as::<_, Booking>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(booking)
    }

    /// Lists bookings matching `filter`, oldest first.
    pub async fn list(&self, filter: &BookingFilter) -> DbResult<Vec<Booking>> {
        let bookings = match filter {
            BookingFilter::All => {
                sqlx::query_as::<_, Booking>(&format!(
                    "SELECT {BOOKING_COLUMNS} FROM bookings ORDER BY id"
                ))
                .fetch_all(&self.pool)
                .await?
            }
            BookingFilter::Customer(name) => {
                sqlx::query_as::<_, Booking>(&format!(
                    "SELECT {BOOKING_COLUMNS} FROM bookings WHERE customer_name = ?1 ORDER BY id"
                ))
                .bind(name)
                .fetch_all(&self.pool)
                .await?
            }
            BookingFilter::Pending => {
                sqlx::query_as::<_, Booking>(&format!(
                    "SELECT {BOOKING_COLUMNS} FROM bookings WHERE status = ?1 ORDER BY id"
                ))
                .bind(BookingStatus::Pending)
                .fetch_all(&self.pool)
                .await?
            }
        };

        debug!(?filter, count = bookings.len(), "Listed bookings");
        Ok(bookings)
    }

    /// Records an admin decision on a pending booking.
    ///
    /// On approval the car is marked unavailable in the same transaction.
    ///
    /// ## Returns
    /// * `Ok(Booking)` - The booking as stored after the decision
    /// * `Err(DbError::StaleState)` - Booking no longer pending, or the car
    ///   was already rented; nothing is written
    pub async fn apply_decision(
        &self,
        booking_id: i64,
        car_id: i64,
        decision: Decision,
    ) -> DbResult<Booking> {
        let status = decision.outcome();
        let now = Utc::now();

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE bookings
            SET status = ?2, decided_at = ?3
            WHERE id = ?1 AND status = ?4
            "#,
        )
        .bind(booking_id)
        .bind(status)
        .bind(now)
        .bind(BookingStatus::Pending)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::stale("Booking", booking_id, "pending"));
        }

        if decision == Decision::Approve {
            let result = sqlx::query("UPDATE cars SET available = 0 WHERE id = ?1 AND available = 1")
                .bind(car_id)
                .execute(&mut *tx)
                .await?;

            if result.rows_affected() == 0 {
                return Err(DbError::stale("Car", car_id, "available"));
            }
        }

        let booking = sqlx::query_as::<_, Booking>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = ?1"
        ))
        .bind(booking_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(booking_id, car_id, status = %status, "Booking decided");
        Ok(booking)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::user::NewUserRecord;
    use rental_core::{NewCar, Role};

    async fn setup() -> (Database, i64) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        db.users()
            .insert(&NewUserRecord {
                username: "customer".to_string(),
                password_hash: "hash".to_string(),
                role: Role::Customer,
                email: "customer@example.com".to_string(),
            })
            .await
            .unwrap();

        let car = db
            .cars()
            .insert(&NewCar {
                make: "Honda".to_string(),
                model: "Civic".to_string(),
                year: 2019,
                mileage: 42000,
                rate_cents: 4000,
                min_days: 2,
                max_days: 14,
            })
            .await
            .unwrap();

        (db, car.id)
    }

    fn record(car_id: i64, days: i32) -> NewBookingRecord {
        NewBookingRecord {
            car_id,
            customer_name: "customer".to_string(),
            days,
            rate_cents: 4000,
            total_fee_cents: 4000 * days as i64,
        }
    }

    #[tokio::test]
    async fn test_insert_pending_roundtrip() {
        let (db, car_id) = setup().await;
        let repo = db.bookings();

        let booking = repo.insert_pending(&record(car_id, 3)).await.unwrap();
        assert_eq!(booking.status, BookingStatus::Pending);

        let loaded = repo.get_by_id(booking.id).await.unwrap().unwrap();
        assert_eq!(loaded.days, 3);
        assert_eq!(loaded.total_fee_cents, 12000);
        assert_eq!(loaded.status, BookingStatus::Pending);
        assert!(loaded.decided_at.is_none());
    }

    #[tokio::test]
    async fn test_foreign_keys_enforced() {
        let (db, car_id) = setup().await;
        let repo = db.bookings();

        let err = repo.insert_pending(&record(car_id + 99, 3)).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));

        let stranger = NewBookingRecord {
            customer_name: "stranger".to_string(),
            ..record(car_id, 3)
        };
        let err = repo.insert_pending(&stranger).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }

    #[tokio::test]
    async fn test_booked_car_cannot_be_deleted() {
        let (db, car_id) = setup().await;
        db.bookings().insert_pending(&record(car_id, 3)).await.unwrap();

        let err = db.cars().delete(car_id).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }

    #[tokio::test]
    async fn test_list_filters() {
        let (db, car_id) = setup().await;
        let repo = db.bookings();

        let first = repo.insert_pending(&record(car_id, 2)).await.unwrap();
        let second = repo.insert_pending(&record(car_id, 4)).await.unwrap();
        repo.apply_decision(first.id, car_id, Decision::Reject)
            .await
            .unwrap();

        assert_eq!(repo.list(&BookingFilter::All).await.unwrap().len(), 2);

        let pending = repo.list(&BookingFilter::Pending).await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, second.id);

        let mine = repo
            .list(&BookingFilter::Customer("customer".to_string()))
            .await
            .unwrap();
        assert_eq!(mine.len(), 2);
        assert!(mine[0].id < mine[1].id);

        let theirs = repo
            .list(&BookingFilter::Customer("admin".to_string()))
            .await
            .unwrap();
        assert!(theirs.is_empty());
    }

    #[tokio::test]
    async fn test_approve_flips_car_availability() {
        let (db, car_id) = setup().await;
        let booking = db.bookings().insert_pending(&record(car_id, 3)).await.unwrap();

        let decided = db
            .bookings()
            .apply_decision(booking.id, car_id, Decision::Approve)
            .await
            .unwrap();
        assert_eq!(decided.status, BookingStatus::Approved);
        assert!(decided.decided_at.is_some());

        let car = db.cars().get_by_id(car_id).await.unwrap().unwrap();
        assert!(!car.available);
    }

    #[tokio::test]
    async fn test_reject_leaves_car_available() {
        let (db, car_id) = setup().await;
        let booking = db.bookings().insert_pending(&record(car_id, 3)).await.unwrap();

        let decided = db
            .bookings()
            .apply_decision(booking.id, car_id, Decision::Reject)
            .await
            .unwrap();
        assert_eq!(decided.status, BookingStatus::Rejected);

        let car = db.cars().get_by_id(car_id).await.unwrap().unwrap();
        assert!(car.available);
    }

    #[tokio::test]
    async fn test_decision_applies_exactly_once() {
        let (db, car_id) = setup().await;
        let repo = db.bookings();
        let booking = repo.insert_pending(&record(car_id, 3)).await.unwrap();

        repo.apply_decision(booking.id, car_id, Decision::Approve)
            .await
            .unwrap();

        for decision in [Decision::Approve, Decision::Reject] {
            let err = repo
                .apply_decision(booking.id, car_id, decision)
                .await
                .unwrap_err();
            assert!(matches!(err, DbError::StaleState { .. }));
        }

        let loaded = repo.get_by_id(booking.id).await.unwrap().unwrap();
        assert_eq!(loaded.status, BookingStatus::Approved);
    }

    #[tokio::test]
    async fn test_second_approval_on_rented_car_rolls_back() {
        let (db, car_id) = setup().await;
        let repo = db.bookings();
        let first = repo.insert_pending(&record(car_id, 3)).await.unwrap();
        let second = repo.insert_pending(&record(car_id, 5)).await.unwrap();

        repo.apply_decision(first.id, car_id, Decision::Approve)
            .await
            .unwrap();

        let err = repo
            .apply_decision(second.id, car_id, Decision::Approve)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::StaleState { ref entity, .. } if entity == "Car"));

        // Status update was rolled back with the transaction
        let loaded = repo.get_by_id(second.id).await.unwrap().unwrap();
        assert_eq!(loaded.status, BookingStatus::Pending);
    }

    #[tokio::test]
    async fn test_unknown_booking_is_stale() {
        let (db, car_id) = setup().await;
        let err = db
            .bookings()
            .apply_decision(404, car_id, Decision::Reject)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::StaleState { .. }));
    }
}
