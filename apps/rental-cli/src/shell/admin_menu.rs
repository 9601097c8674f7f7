//! Admin menu: fleet management and booking decisions.

use rental_core::{BookingFilter, BookingStatus, NewCar, Session};

use super::{print_bookings, print_cars, prompt};
use crate::error::AppResult;
use crate::service::RentalService;

const ENTRIES: &[&str] = &[
    "Add Car",
    "Update Car",
    "Delete Car",
    "Show Available Cars",
    "View Bookings",
    "Approve/Reject Bookings",
    "Exit",
];

pub async fn run(service: &RentalService, session: &Session) -> dialoguer::Result<()> {
    loop {
        let result = match prompt::menu("Main Menu", ENTRIES)? {
            1 => add_car(service, session).await?,
            2 => update_car(service, session).await?,
            3 => delete_car(service, session).await?,
            4 => show_available(service).await,
            5 => view_bookings(service, session).await,
            6 => decide(service, session).await?,
            _ => return Ok(()),
        };

        if let Err(e) = result {
            prompt::failure(&e);
        }
    }
}

async fn add_car(service: &RentalService, session: &Session) -> dialoguer::Result<AppResult<()>> {
    prompt::heading("-- Add New Car --");
    let car = NewCar {
        make: prompt::text("Car make (e.g. Toyota)")?,
        model: prompt::text("Car model (e.g. Camry)")?,
        year: prompt::number("Manufacture year")?,
        mileage: prompt::number("Current mileage")?,
        rate_cents: prompt::money("Daily rental rate ($)")?.cents(),
        min_days: prompt::number("Minimum rental days")?,
        max_days: prompt::number("Maximum rental days")?,
    };

    Ok(service.add_car(session, car).await.map(|car| {
        prompt::success(format!(
            "New car '{} {}' added with ID {}.",
            car.make, car.model, car.id
        ));
    }))
}

async fn update_car(
    service: &RentalService,
    session: &Session,
) -> dialoguer::Result<AppResult<()>> {
    let car_id: i64 = prompt::number("Car ID to update")?;
    let mileage: i64 = prompt::number("New mileage")?;
    let rate = prompt::money("New daily rate ($)")?;

    Ok(service
        .update_car(session, car_id, mileage, rate)
        .await
        .map(|car| prompt::success(format!("Car ID {} updated: {}", car.id, car))))
}

async fn delete_car(
    service: &RentalService,
    session: &Session,
) -> dialoguer::Result<AppResult<()>> {
    let car_id: i64 = prompt::number("Car ID to delete")?;
    if !prompt::confirm(&format!("Delete car {}?", car_id), false)? {
        prompt::notice("Cancelled.");
        return Ok(Ok(()));
    }

    Ok(service
        .delete_car(session, car_id)
        .await
        .map(|()| prompt::success(format!("Car ID {} deleted.", car_id))))
}

async fn show_available(service: &RentalService) -> AppResult<()> {
    let cars = service.available_cars().await?;
    print_cars(&cars);
    Ok(())
}

async fn view_bookings(service: &RentalService, session: &Session) -> AppResult<()> {
    let bookings = service.list_bookings(session, BookingFilter::All).await?;
    print_bookings("📋 Bookings:", &bookings, "🙅 No bookings found.");
    Ok(())
}

async fn decide(service: &RentalService, session: &Session) -> dialoguer::Result<AppResult<()>> {
    let pending = match service.pending_bookings(session).await {
        Ok(pending) => pending,
        Err(e) => return Ok(Err(e)),
    };

    print_bookings("⌛ Pending Bookings:", &pending, "🟡 No pending bookings.");
    if pending.is_empty() {
        return Ok(Ok(()));
    }

    let booking_id: i64 = prompt::number("Enter Booking ID to manage")?;
    let action = prompt::text("Approve or Reject? (a/r)")?;
    let Some(decision) = prompt::parse_decision(&action) else {
        prompt::notice("Invalid action. Please enter 'a' or 'r'.");
        return Ok(Ok(()));
    };

    Ok(service
        .decide_booking(session, booking_id, decision)
        .await
        .map(|booking| match booking.status {
            BookingStatus::Approved => {
                prompt::success(format!("Booking ID {} approved.", booking.id))
            }
            _ => prompt::notice(format!("❌ Booking ID {} rejected.", booking.id)),
        }))
}
