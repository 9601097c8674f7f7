//! # Console Shell
//!
//! Numbered menus over [`RentalService`].
//!
//! ```text
//! auth_menu ── Login / Register ──► Session
//!                                      │
//!                     ┌────────────────┴────────────────┐
//!                     ▼                                 ▼
//!               admin_menu                        customer_menu
//!   Add / Update / Delete Car            Show Cars / Book / My Bookings
//!   Show Cars / View Bookings            Generate/View Bill (+ save)
//!   Approve/Reject
//! ```
//!
//! Service errors are printed and the menu comes back. Only a broken
//! terminal (a `dialoguer` I/O error) ends the loop early.

mod admin_menu;
mod auth_menu;
mod customer_menu;
mod prompt;

use console::style;

use rental_core::{Booking, Car};

use crate::service::RentalService;

/// Runs the console until the user chooses Exit.
pub async fn run(service: &RentalService) -> dialoguer::Result<()> {
    if let Some(session) = auth_menu::run(service).await? {
        if session.is_admin() {
            admin_menu::run(service, &session).await?;
        } else {
            customer_menu::run(service, &session).await?;
        }
    }

    println!("{}", style("Goodbye, see you again!").cyan());
    Ok(())
}

fn print_cars(cars: &[Car]) {
    if cars.is_empty() {
        prompt::notice("⛔ No available cars found.");
        return;
    }

    prompt::heading("🚘 Available Cars:");
    for car in cars {
        println!("{}", car);
    }
}

fn print_bookings(title: &str, bookings: &[Booking], empty: &str) {
    if bookings.is_empty() {
        prompt::notice(empty);
        return;
    }

    prompt::heading(title);
    for booking in bookings {
        println!("{}", booking);
    }
}
