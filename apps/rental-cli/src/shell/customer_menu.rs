//! Customer menu: browse, book, follow up, and get the bill.

use rental_core::{BookingFilter, Session};

use super::{print_bookings, print_cars, prompt};
use crate::error::AppResult;
use crate::service::RentalService;

const ENTRIES: &[&str] = &[
    "Show Available Cars",
    "Book a Car",
    "View My Bookings",
    "Generate/View Bill",
    "Exit",
];

pub async fn run(service: &RentalService, session: &Session) -> dialoguer::Result<()> {
    loop {
        let result = match prompt::menu("Main Menu", ENTRIES)? {
            1 => show_available(service).await,
            2 => book(service, session).await?,
            3 => my_bookings(service, session).await,
            4 => bill(service, session).await?,
            _ => return Ok(()),
        };

        if let Err(e) = result {
            prompt::failure(&e);
        }
    }
}

async fn show_available(service: &RentalService) -> AppResult<()> {
    let cars = service.available_cars().await?;
    print_cars(&cars);
    Ok(())
}

async fn book(service: &RentalService, session: &Session) -> dialoguer::Result<AppResult<()>> {
    let car_id: i64 = prompt::number("Car ID")?;
    let days: i32 = prompt::number("Rental days")?;

    Ok(service.book_car(session, car_id, days).await.map(|booking| {
        prompt::success(format!(
            "Booking {} submitted successfully and is pending approval! Fee: {}",
            booking.id,
            booking.total_fee()
        ));
    }))
}

async fn my_bookings(service: &RentalService, session: &Session) -> AppResult<()> {
    let bookings = service
        .list_bookings(session, BookingFilter::Customer(session.username.clone()))
        .await?;
    print_bookings("📋 Bookings:", &bookings, "🙅 No bookings found.");
    Ok(())
}

async fn bill(service: &RentalService, session: &Session) -> dialoguer::Result<AppResult<()>> {
    let booking_id: i64 = prompt::number("Enter your Booking ID to generate/view bill")?;

    let bill = match service.generate_bill(session, booking_id).await {
        Ok(bill) => bill,
        Err(e) => return Ok(Err(e)),
    };

    println!("🧾 Generating bill...");
    println!();
    println!("{}", bill);
    println!();

    if !prompt::confirm("Save bill to text file?", false)? {
        return Ok(Ok(()));
    }

    Ok(service
        .export_bill(&bill)
        .await
        .map(|path| prompt::success(format!("Bill saved as {}", path.display()))))
}
