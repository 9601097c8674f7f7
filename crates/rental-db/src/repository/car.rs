//! # Car Repository
//!
//! Fleet storage. Availability is only ever cleared, by
//! [`BookingRepository::apply_decision`](super::booking::BookingRepository::apply_decision)
//! when a booking is approved; nothing here sets it back.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use rental_core::{Car, NewCar};

const CAR_COLUMNS: &str =
    "id, make, model, year, mileage, rate_cents, min_days, max_days, available";

/// Repository for car database operations.
#[derive(Debug, Clone)]
pub struct CarRepository {
    pool: SqlitePool,
}

impl CarRepository {
    /// Creates a new CarRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CarRepository { pool }
    }

    /// Inserts a car. New cars are always available.
    ///
    /// The caller validates `car` first; the schema CHECKs are a backstop.
    pub async fn insert(&self, car: &NewCar) -> DbResult<Car> {
        debug!(make = %car.make, model = %car.model, "Inserting car");

        let result = sqlx::query(
            r#"
            INSERT INTO cars (make, model, year, mileage, rate_cents, min_days, max_days, available)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 1)
            "#,
        )
        .bind(&car.make)
        .bind(&car.model)
        .bind(car.year)
        .bind(car.mileage)
        .bind(car.rate_cents)
        .bind(car.min_days)
        .bind(car.max_days)
        .execute(&self.pool)
        .await?;

        Ok(Car {
            id: result.last_insert_rowid(),
            make: car.make.clone(),
            model: car.model.clone(),
            year: car.year,
            mileage: car.mileage,
            rate_cents: car.rate_cents,
            min_days: car.min_days,
            max_days: car.max_days,
            available: true,
        })
    }

    /// Gets a car by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Car>> {
        let car = sqlx::query_as::<_, Car>(&format!(
            "SELECT {CAR_COLUMNS} FROM cars WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(car)
    }

    /// Lists cars that can still be booked, ordered by id.
    pub async fn list_available(&self) -> DbResult<Vec<Car>> {
        let cars = sqlx::query_as::<_, Car>(&format!(
            "SELECT {CAR_COLUMNS} FROM cars WHERE available = 1 ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = cars.len(), "Listed available cars");
        Ok(cars)
    }

    /// Sets a car's mileage and daily rate.
    ///
    /// Existing bookings keep the rate they were made at.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - No car with this id
    pub async fn update_mileage_and_rate(
        &self,
        id: i64,
        mileage: i64,
        rate_cents: i64,
    ) -> DbResult<()> {
        debug!(id, mileage, rate_cents, "Updating car");

        let result = sqlx::query("UPDATE cars SET mileage = ?2, rate_cents = ?3 WHERE id = ?1")
            .bind(id)
            .bind(mileage)
            .bind(rate_cents)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Car", id));
        }

        Ok(())
    }

    /// Deletes a car.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - No car with this id
    /// * `Err(DbError::ForeignKeyViolation)` - Bookings still reference it
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting car");

        let result = sqlx::query("DELETE FROM cars WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Car", id));
        }

        Ok(())
    }

    /// Counts all cars, rented or not.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cars")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    fn camry() -> NewCar {
        NewCar {
            make: "Toyota".to_string(),
            model: "Camry".to_string(),
            year: 2020,
            mileage: 35000,
            rate_cents: 4599,
            min_days: 1,
            max_days: 15,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.cars();

        let car = repo.insert(&camry()).await.unwrap();
        assert!(car.available);

        let loaded = repo.get_by_id(car.id).await.unwrap().unwrap();
        assert_eq!(loaded.make, "Toyota");
        assert_eq!(loaded.rate_cents, 4599);
        assert!(loaded.available);

        assert!(repo.get_by_id(car.id + 100).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_available_orders_by_id_and_skips_rented() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.cars();

        let a = repo.insert(&camry()).await.unwrap();
        let b = repo.insert(&camry()).await.unwrap();
        let c = repo.insert(&camry()).await.unwrap();

        sqlx::query("UPDATE cars SET available = 0 WHERE id = ?1")
            .bind(b.id)
            .execute(db.pool())
            .await
            .unwrap();

        let ids: Vec<i64> = repo
            .list_available()
            .await
            .unwrap()
            .into_iter()
            .map(|car| car.id)
            .collect();
        assert_eq!(ids, vec![a.id, c.id]);
        assert_eq!(repo.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_update_mileage_and_rate() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.cars();
        let car = repo.insert(&camry()).await.unwrap();

        repo.update_mileage_and_rate(car.id, 36000, 4999).await.unwrap();

        let loaded = repo.get_by_id(car.id).await.unwrap().unwrap();
        assert_eq!(loaded.mileage, 36000);
        assert_eq!(loaded.rate_cents, 4999);
        assert_eq!(loaded.make, "Toyota");
    }

    #[tokio::test]
    async fn test_update_unknown_car() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let err = db
            .cars()
            .update_mileage_and_rate(42, 1, 1)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.cars();
        let car = repo.insert(&camry()).await.unwrap();

        repo.delete(car.id).await.unwrap();
        assert!(repo.get_by_id(car.id).await.unwrap().is_none());

        let err = repo.delete(car.id).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_schema_rejects_non_positive_rate() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let bad = NewCar {
            rate_cents: 0,
            ..camry()
        };
        assert!(db.cars().insert(&bad).await.is_err());
    }
}
