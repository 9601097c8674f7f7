//! # Bill Module
//!
//! Turns an approved booking into a bill.
//!
//! ## Bill Math
//! ```text
//! Booking { days: 3, rate_cents: 4599 }   (rate frozen at booking time)
//!      │
//!      ▼
//! subtotal = days × rate            = $137.97
//! tax      = subtotal × 10% (½ up)  =  $13.80
//! total    = subtotal + tax         = $151.77
//! ```
//!
//! Since `subtotal` is a whole number of cents, `subtotal + round(subtotal/10)`
//! is exactly `days × rate × 1.10` rounded to two decimals.

use std::fmt;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Booking, BookingStatus, Car, TaxRate};
use crate::BILL_TAX_RATE;

/// The three amounts printed on every bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BillTotals {
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
}

impl BillTotals {
    /// Computes the bill amounts for `days` at a daily `rate`.
    ///
    /// ## Errors
    /// `FeeOverflow` when an amount does not fit in i64 cents.
    pub fn compute(days: i32, rate: Money, tax_rate: TaxRate) -> CoreResult<Self> {
        let overflow = || CoreError::FeeOverflow {
            days,
            rate_cents: rate.cents(),
        };

        let subtotal = rate.multiply_days(days).ok_or_else(overflow)?;
        let tax = subtotal.calculate_tax(tax_rate);
        let total = subtotal.checked_add(tax).ok_or_else(overflow)?;

        Ok(BillTotals {
            subtotal,
            tax,
            total,
        })
    }
}

/// A rendered rental bill.
#[derive(Debug, Clone)]
pub struct Bill {
    pub booking_id: i64,
    pub customer_name: String,
    /// `Make Model (Year)`.
    pub car: String,
    pub days: i32,
    pub rate: Money,
    pub tax_rate: TaxRate,
    pub totals: BillTotals,
}

impl Bill {
    /// Builds the bill for an approved booking.
    ///
    /// ## Errors
    /// `BillRequiresApproval` when the booking is pending or rejected.
    pub fn for_booking(booking: &Booking, car: &Car) -> CoreResult<Bill> {
        if booking.status != BookingStatus::Approved {
            return Err(CoreError::BillRequiresApproval {
                booking_id: booking.id,
                status: booking.status.to_string(),
            });
        }

        let rate = booking.rate();
        Ok(Bill {
            booking_id: booking.id,
            customer_name: booking.customer_name.clone(),
            car: car.description(),
            days: booking.days,
            rate,
            tax_rate: BILL_TAX_RATE,
            totals: BillTotals::compute(booking.days, rate, BILL_TAX_RATE)?,
        })
    }

    /// File name used when the customer saves the bill.
    pub fn file_name(&self) -> String {
        format!("bill_booking_{}.txt", self.booking_id)
    }
}

impl fmt::Display for Bill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "===== Car Rental Bill =====")?;
        writeln!(f)?;
        writeln!(f, "Booking ID: {}", self.booking_id)?;
        writeln!(f, "Customer Name: {}", self.customer_name)?;
        writeln!(f, "Car: {}", self.car)?;
        writeln!(f, "Rental Duration: {} days", self.days)?;
        writeln!(f, "Rate per day: {}", self.rate)?;
        writeln!(f, "-----------------------------")?;
        writeln!(f, "Subtotal: {}", self.totals.subtotal)?;
        writeln!(
            f,
            "Tax ({}): {}",
            self.tax_rate.display_percent(),
            self.totals.tax
        )?;
        writeln!(f, "-----------------------------")?;
        writeln!(f, "Total Amount Due: {}", self.totals.total)?;
        writeln!(f)?;
        writeln!(f, "Status: Approved")?;
        writeln!(f)?;
        writeln!(f, "Thank you for renting with us!")?;
        write!(f, "=============================")
    }
}
