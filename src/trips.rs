//! Trip grouping and daily figures.
//!
//! A trip slot is a (departure time, service type) pair. Bookings for a day
//! are partitioned into slots for manifest display and bulk driver
//! assignment. Grouping only reports occupancy; it never enforces capacity.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Booking, ServiceType};
use crate::pricing::calculators::{round_money, DRIVER_COMMISSION_PERCENT};

/// Composite key identifying one departure: time plus service type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TripKey {
    pub time: NaiveTime,
    pub service_type: ServiceType,
}

impl fmt::Display for TripKey {
    /// Renders as `08:00-SHARED`, the slot label dashboards show.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.time.format("%H:%M"), self.service_type)
    }
}

/// One departure and its passenger manifest, arrival order preserved.
#[derive(Debug, Clone)]
pub struct TripSlot {
    pub key: TripKey,
    pub bookings: Vec<Booking>,
}

impl TripSlot {
    /// Seats taken across the manifest. Can legally exceed the vehicle
    /// capacity; dashboards flag it, nothing blocks it.
    pub fn occupancy(&self) -> u32 {
        self.bookings.iter().map(|b| b.seats).sum()
    }

    /// Driver for the slot, read from the first booking. Bulk assignment
    /// writes the same driver to every booking, so the first one stands
    /// for the group.
    pub fn driver_id(&self) -> Option<&str> {
        self.bookings.first().and_then(|b| b.driver_id.as_deref())
    }
}

/// Group a date's active bookings into trip slots.
///
/// Cancelled bookings and bookings for other dates are excluded. Slots come
/// back ordered by time then service type; within a slot, bookings keep the
/// order they arrived in the collection.
pub fn group_trips_by_date(date: NaiveDate, bookings: &[Booking]) -> Vec<TripSlot> {
    let mut slots: BTreeMap<TripKey, Vec<Booking>> = BTreeMap::new();

    for booking in bookings {
        if booking.date != date || !booking.is_active() {
            continue;
        }
        let key = TripKey {
            time: booking.time,
            service_type: booking.service_type,
        };
        slots.entry(key).or_default().push(booking.clone());
    }

    slots
        .into_iter()
        .map(|(key, bookings)| TripSlot { key, bookings })
        .collect()
}

/// Seat ids already taken in a SHARED slot, for the seat picker.
pub fn occupied_seat_ids(date: NaiveDate, time: NaiveTime, bookings: &[Booking]) -> BTreeSet<u8> {
    bookings
        .iter()
        .filter(|b| {
            b.date == date
                && b.time == time
                && b.service_type == ServiceType::Shared
                && b.is_active()
        })
        .flat_map(|b| b.selected_seat_ids.iter().copied())
        .collect()
}

/// Income and commission figures for one day.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_income: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub driver_commission: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub net_profit: Decimal,
    pub trips_count: u32,
}

/// Daily figures over the date's active bookings: income is the sum of
/// booking totals, drivers take their commission cut, the rest is net.
pub fn daily_stats(date: NaiveDate, bookings: &[Booking]) -> DailyStats {
    let total_income: Decimal = bookings
        .iter()
        .filter(|b| b.date == date && b.is_active())
        .map(|b| b.total_price)
        .sum();
    let driver_commission = round_money(total_income * DRIVER_COMMISSION_PERCENT, 2);
    let trips_count = group_trips_by_date(date, bookings).len() as u32;

    DailyStats {
        date,
        net_profit: total_income - driver_commission,
        total_income,
        driver_commission,
        trips_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BookingStatus, PickupLocationType};
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn booking(
        id: &str,
        date: &str,
        time: &str,
        service_type: ServiceType,
        seats: u32,
        status: BookingStatus,
    ) -> Booking {
        Booking {
            id: id.to_string(),
            service_type,
            customer_name: format!("Customer {}", id),
            customer_dni: "12345678".to_string(),
            customer_phone: "987654321".to_string(),
            date: date.parse().unwrap(),
            time: NaiveTime::parse_from_str(time, "%H:%M").unwrap(),
            seats,
            selected_seat_ids: (1..=seats as u8).collect(),
            pickup_type: PickupLocationType::KnownPoint,
            pickup_address: "Plaza de Armas Jauja".to_string(),
            total_price: dec!(11.00) * Decimal::from(seats),
            prepayment_amount: dec!(0),
            status,
            payment_proof_url: None,
            driver_id: None,
            created_at: Utc::now(),
        }
    }

    fn may_first() -> NaiveDate {
        "2024-05-01".parse().unwrap()
    }

    #[test]
    fn test_groups_by_time_and_service_type() {
        let bookings = vec![
            booking("bk-1", "2024-05-01", "08:00", ServiceType::Shared, 2, BookingStatus::Confirmed),
            booking("bk-2", "2024-05-01", "08:00", ServiceType::Shared, 3, BookingStatus::PendingPayment),
            booking("bk-3", "2024-05-01", "08:00", ServiceType::Private, 6, BookingStatus::Confirmed),
            booking("bk-4", "2024-05-01", "10:30", ServiceType::Shared, 1, BookingStatus::Confirmed),
        ];

        let slots = group_trips_by_date(may_first(), &bookings);
        let keys: Vec<String> = slots.iter().map(|s| s.key.to_string()).collect();
        assert_eq!(keys, vec!["08:00-PRIVATE", "08:00-SHARED", "10:30-SHARED"]);

        let shared = &slots[1];
        assert_eq!(shared.occupancy(), 5);
        // Arrival order within the slot is preserved
        let ids: Vec<&str> = shared.bookings.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["bk-1", "bk-2"]);
    }

    #[test]
    fn test_excludes_cancelled_and_other_dates() {
        let bookings = vec![
            booking("bk-1", "2024-05-01", "08:00", ServiceType::Shared, 2, BookingStatus::Confirmed),
            booking("bk-2", "2024-05-01", "08:00", ServiceType::Shared, 3, BookingStatus::Cancelled),
            booking("bk-3", "2024-05-02", "08:00", ServiceType::Shared, 1, BookingStatus::Confirmed),
        ];

        let slots = group_trips_by_date(may_first(), &bookings);
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].bookings.len(), 1);
        assert_eq!(slots[0].bookings[0].id, "bk-1");
    }

    #[test]
    fn test_pending_bookings_count_toward_occupancy() {
        // Pending bookings hold their seats until cancelled
        let bookings = vec![
            booking("bk-1", "2024-05-01", "08:00", ServiceType::Shared, 2, BookingStatus::Confirmed),
            booking("bk-2", "2024-05-01", "08:00", ServiceType::Shared, 3, BookingStatus::PendingPayment),
        ];

        let slots = group_trips_by_date(may_first(), &bookings);
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].key.to_string(), "08:00-SHARED");
        assert_eq!(slots[0].occupancy(), 5);
    }

    #[test]
    fn test_occupancy_may_exceed_capacity() {
        // Grouping reports; it does not enforce the 6-seat ceiling
        let bookings = vec![
            booking("bk-1", "2024-05-01", "08:00", ServiceType::Shared, 4, BookingStatus::Confirmed),
            booking("bk-2", "2024-05-01", "08:00", ServiceType::Shared, 4, BookingStatus::Confirmed),
        ];

        let slots = group_trips_by_date(may_first(), &bookings);
        assert_eq!(slots[0].occupancy(), 8);
    }

    #[test]
    fn test_slot_driver_comes_from_first_booking() {
        let mut first = booking("bk-1", "2024-05-01", "08:00", ServiceType::Shared, 2, BookingStatus::Confirmed);
        first.driver_id = Some("d1".to_string());
        let second = booking("bk-2", "2024-05-01", "08:00", ServiceType::Shared, 1, BookingStatus::Confirmed);

        let slots = group_trips_by_date(may_first(), &[first, second]);
        assert_eq!(slots[0].driver_id(), Some("d1"));
    }

    #[test]
    fn test_occupied_seat_ids() {
        let mut taken = booking("bk-1", "2024-05-01", "08:00", ServiceType::Shared, 2, BookingStatus::Confirmed);
        taken.selected_seat_ids = vec![1, 4];
        let mut cancelled = booking("bk-2", "2024-05-01", "08:00", ServiceType::Shared, 2, BookingStatus::Cancelled);
        cancelled.selected_seat_ids = vec![2, 3];
        let other_slot = booking("bk-3", "2024-05-01", "10:30", ServiceType::Shared, 1, BookingStatus::Confirmed);

        let time = NaiveTime::parse_from_str("08:00", "%H:%M").unwrap();
        let occupied = occupied_seat_ids(may_first(), time, &[taken, cancelled, other_slot]);
        assert_eq!(occupied.into_iter().collect::<Vec<_>>(), vec![1, 4]);
    }

    #[test]
    fn test_private_bookings_do_not_block_shared_seats() {
        let private = booking("bk-1", "2024-05-01", "08:00", ServiceType::Private, 6, BookingStatus::Confirmed);
        let time = NaiveTime::parse_from_str("08:00", "%H:%M").unwrap();
        assert!(occupied_seat_ids(may_first(), time, &[private]).is_empty());
    }

    #[test]
    fn test_daily_stats() {
        let bookings = vec![
            booking("bk-1", "2024-05-01", "08:00", ServiceType::Shared, 2, BookingStatus::Confirmed),
            booking("bk-2", "2024-05-01", "10:30", ServiceType::Shared, 3, BookingStatus::Confirmed),
            booking("bk-3", "2024-05-01", "12:00", ServiceType::Shared, 1, BookingStatus::Cancelled),
        ];

        let stats = daily_stats(may_first(), &bookings);
        // 2*11 + 3*11, cancelled excluded
        assert_eq!(stats.total_income, dec!(55.00));
        assert_eq!(stats.driver_commission, dec!(16.50));
        assert_eq!(stats.net_profit, dec!(38.50));
        assert_eq!(stats.trips_count, 2);
    }

    #[test]
    fn test_daily_stats_empty_day() {
        let stats = daily_stats(may_first(), &[]);
        assert_eq!(stats.total_income, dec!(0));
        assert_eq!(stats.trips_count, 0);
    }
}
