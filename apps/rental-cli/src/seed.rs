//! # Demo Data
//!
//! Fills an empty database with a small fleet and the two default
//! accounts so the desk is usable on first run.
//!
//! | Account    | Password   | Role     |
//! |------------|------------|----------|
//! | `admin`    | `admin123` | admin    |
//! | `customer` | `cust123`  | customer |
//!
//! Cars are only inserted when the fleet is empty; accounts are only
//! created when missing. Running it on every startup is harmless.

use tracing::info;

use rental_core::{NewCar, Role};
use rental_db::{Database, NewUserRecord};

use crate::auth;
use crate::error::AppResult;

/// (make, model, year, mileage, rate in cents, min days, max days)
const DEMO_CARS: &[(&str, &str, i32, i64, i64, i32, i32)] = &[
    ("Toyota", "Camry", 2020, 35000, 4599, 1, 15),
    ("Honda", "Civic", 2019, 42000, 4000, 2, 14),
    ("Ford", "Focus", 2018, 50000, 3850, 1, 10),
    ("Chevrolet", "Malibu", 2021, 22000, 4899, 3, 12),
    ("Nissan", "Altima", 2020, 31000, 4450, 2, 14),
    ("Hyundai", "Elantra", 2019, 46000, 3999, 1, 10),
    ("Kia", "Forte", 2021, 18000, 4200, 1, 12),
    ("Mazda", "Mazda3", 2022, 12000, 5000, 1, 15),
    ("Volkswagen", "Jetta", 2017, 55000, 3599, 2, 10),
    ("Subaru", "Impreza", 2021, 27000, 4725, 1, 13),
];

/// (username, password, role, email)
const DEFAULT_USERS: &[(&str, &str, Role, &str)] = &[
    ("admin", "admin123", Role::Admin, "admin@example.com"),
    ("customer", "cust123", Role::Customer, "customer@example.com"),
];

/// What a seeding run inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub cars: usize,
    pub users: usize,
}

/// Inserts demo cars into an empty fleet and any missing default account.
pub async fn seed_demo_data(db: &Database) -> AppResult<SeedReport> {
    let mut report = SeedReport::default();

    if db.cars().count().await? == 0 {
        for &(make, model, year, mileage, rate_cents, min_days, max_days) in DEMO_CARS {
            let car = NewCar {
                make: make.to_string(),
                model: model.to_string(),
                year,
                mileage,
                rate_cents,
                min_days,
                max_days,
            }
            .validated()?;
            db.cars().insert(&car).await?;
            report.cars += 1;
        }
    }

    for &(username, password, role, email) in DEFAULT_USERS {
        if db.users().get_by_username(username).await?.is_some() {
            continue;
        }

        db.users()
            .insert(&NewUserRecord {
                username: username.to_string(),
                password_hash: auth::hash_password(password)?,
                role,
                email: email.to_string(),
            })
            .await?;
        report.users += 1;
    }

    if report != SeedReport::default() {
        info!(cars = report.cars, users = report.users, "Demo data seeded");
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rental_db::DbConfig;

    #[tokio::test]
    async fn test_seed_fills_empty_database() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let report = seed_demo_data(&db).await.unwrap();
        assert_eq!(report, SeedReport { cars: 10, users: 2 });

        let cars = db.cars().list_available().await.unwrap();
        assert_eq!(cars.len(), 10);
        assert_eq!(cars[0].description(), "Toyota Camry (2020)");
        assert_eq!(cars[0].rate_cents, 4599);

        let admin = db.users().get_by_username("admin").await.unwrap().unwrap();
        assert_eq!(admin.role, Role::Admin);
        assert_eq!(
            auth::verify_password("admin123", &admin.password_hash),
            auth::PasswordCheck::Verified
        );
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        seed_demo_data(&db).await.unwrap();

        let again = seed_demo_data(&db).await.unwrap();
        assert_eq!(again, SeedReport::default());
        assert_eq!(db.cars().count().await.unwrap(), 10);
        assert_eq!(db.users().count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_seed_keeps_existing_fleet() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.cars()
            .insert(&NewCar {
                make: "Tesla".to_string(),
                model: "Model 3".to_string(),
                year: 2023,
                mileage: 5000,
                rate_cents: 9900,
                min_days: 1,
                max_days: 7,
            })
            .await
            .unwrap();

        let report = seed_demo_data(&db).await.unwrap();
        assert_eq!(report.cars, 0);
        assert_eq!(db.cars().count().await.unwrap(), 1);
    }
}
