//! Core fare calculation.
//!
//! Pure functions for pricing math - no storage access. Fares are derived
//! once when a booking is created and never recomputed afterwards.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::ServiceType;

/// Flat fare for a PRIVATE vehicle, city pickup
pub const PRIVATE_BASE: Decimal = dec!(70.00);
/// Flat fare for a PRIVATE vehicle, airport pickup
pub const PRIVATE_AIRPORT: Decimal = dec!(80.00);
/// Per-seat fare for SHARED bookings below the promo threshold
pub const SHARED_SEAT_BASE: Decimal = dec!(11.00);
/// Per-seat fare once the promo threshold is reached
pub const SHARED_SEAT_PROMO: Decimal = dec!(9.00);
/// Seats needed for the promo rate. The threshold applies to the whole
/// booking: every seat, including the first three, gets the promo rate.
pub const MIN_PROMO_SEATS: u32 = 4;

/// Prepayment required before confirmation, as a fraction of the total
pub const PRIVATE_PREPAY_PERCENT: Decimal = dec!(0.50);
pub const SHARED_PREPAY_PERCENT: Decimal = dec!(0.40);

/// Driver's cut of trip income
pub const DRIVER_COMMISSION_PERCENT: Decimal = dec!(0.30);

/// A priced booking: the full fare, the advance required to confirm, and
/// the per-unit rate that produced the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fare {
    pub total: Decimal,
    pub prepayment: Decimal,
    pub unit_price: Decimal,
}

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// Banker's rounding rounds to the nearest even number when the value is exactly
/// halfway between two possibilities. This reduces cumulative rounding bias.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use travelfast_web::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));   // rounds to even
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));   // rounds to even
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// Calculate the fare for a booking.
///
/// - PRIVATE: flat fare (airport pickup costs more), independent of seats;
///   prepayment is 50% of the total.
/// - SHARED: per-seat fare, discounted for the whole booking at 4+ seats;
///   prepayment is 40% of the total.
///
/// Total over its domain: `seats == 0` yields a zero total for SHARED rather
/// than an error. Callers validate `seats >= 1` before booking.
pub fn calculate_price(service_type: ServiceType, seats: u32, is_airport: bool) -> Fare {
    match service_type {
        ServiceType::Private => {
            let total = if is_airport { PRIVATE_AIRPORT } else { PRIVATE_BASE };
            Fare {
                total,
                prepayment: round_money(total * PRIVATE_PREPAY_PERCENT, 2),
                unit_price: total,
            }
        }
        ServiceType::Shared => {
            let unit_price = if seats >= MIN_PROMO_SEATS {
                SHARED_SEAT_PROMO
            } else {
                SHARED_SEAT_BASE
            };
            let total = Decimal::from(seats) * unit_price;
            Fare {
                total,
                prepayment: round_money(total * SHARED_PREPAY_PERCENT, 2),
                unit_price,
            }
        }
    }
}
