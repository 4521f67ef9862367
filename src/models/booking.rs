//! Booking records and the reservation status state machine.
//!
//! Records are stored and served as camelCase JSON, matching the shape the
//! booking front-end persists.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whole-vehicle vs per-seat booking mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceType {
    Private,
    Shared,
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceType::Private => write!(f, "PRIVATE"),
            ServiceType::Shared => write!(f, "SHARED"),
        }
    }
}

/// Reservation lifecycle.
///
/// Transitions are validated: a booking enters at `PendingPayment`, moves to
/// `Verifying` when a payment proof is attached, is confirmed or cancelled by
/// an administrator, and is completed by the driver only once confirmed.
/// Anything else is an illegal jump and is rejected by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    PendingPayment,
    Verifying,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    /// Whether moving from `self` to `next` is a legal transition.
    pub fn can_transition_to(self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        matches!(
            (self, next),
            (PendingPayment, Verifying)
                | (PendingPayment, Confirmed)
                | (PendingPayment, Cancelled)
                | (Verifying, Confirmed)
                | (Verifying, Cancelled)
                | (Confirmed, Completed)
                | (Confirmed, Cancelled)
        )
    }

    /// Terminal states accept no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::Cancelled)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BookingStatus::PendingPayment => "PENDING_PAYMENT",
            BookingStatus::Verifying => "VERIFYING",
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::Completed => "COMPLETED",
            BookingStatus::Cancelled => "CANCELLED",
        };
        write!(f, "{}", s)
    }
}

/// How the pickup address should be interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PickupLocationType {
    KnownPoint,
    ExactAddress,
}

/// A stored reservation.
///
/// `total_price` and `prepayment_amount` are derived once at creation and
/// never recomputed. `seats` equals 6 for PRIVATE and the number of selected
/// seat ids for SHARED.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub service_type: ServiceType,
    pub customer_name: String,
    pub customer_dni: String,
    pub customer_phone: String,
    pub date: NaiveDate,
    #[serde(with = "time_hm")]
    pub time: NaiveTime,
    pub seats: u32,
    pub selected_seat_ids: Vec<u8>,
    pub pickup_type: PickupLocationType,
    pub pickup_address: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub prepayment_amount: Decimal,
    pub status: BookingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_proof_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Cancelled bookings drop out of manifests and stats.
    pub fn is_active(&self) -> bool {
        self.status != BookingStatus::Cancelled
    }
}

/// Departure times are stored as `HH:MM` strings.
pub mod time_hm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn sample_booking() -> Booking {
        Booking {
            id: "bk-test".to_string(),
            service_type: ServiceType::Shared,
            customer_name: "Juan Pérez".to_string(),
            customer_dni: "12345678".to_string(),
            customer_phone: "987654321".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            seats: 2,
            selected_seat_ids: vec![1, 2],
            pickup_type: PickupLocationType::KnownPoint,
            pickup_address: "Plaza de Armas Jauja".to_string(),
            total_price: dec!(22.00),
            prepayment_amount: dec!(8.80),
            status: BookingStatus::PendingPayment,
            payment_proof_url: None,
            driver_id: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_legal_transitions() {
        use BookingStatus::*;
        assert!(PendingPayment.can_transition_to(Verifying));
        assert!(PendingPayment.can_transition_to(Confirmed));
        assert!(PendingPayment.can_transition_to(Cancelled));
        assert!(Verifying.can_transition_to(Confirmed));
        assert!(Verifying.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(Completed));
        assert!(Confirmed.can_transition_to(Cancelled));
    }

    #[test]
    fn test_illegal_transitions_rejected() {
        use BookingStatus::*;
        // Completion is only reachable from Confirmed
        assert!(!PendingPayment.can_transition_to(Completed));
        assert!(!Verifying.can_transition_to(Completed));
        // No going backwards
        assert!(!Confirmed.can_transition_to(PendingPayment));
        assert!(!Confirmed.can_transition_to(Verifying));
        assert!(!Verifying.can_transition_to(PendingPayment));
        // Self transitions are not a thing
        assert!(!Confirmed.can_transition_to(Confirmed));
        assert!(!PendingPayment.can_transition_to(PendingPayment));
    }

    #[test]
    fn test_terminal_states() {
        use BookingStatus::*;
        assert!(Completed.is_terminal());
        assert!(Cancelled.is_terminal());
        assert!(!Confirmed.is_terminal());

        for next in [PendingPayment, Verifying, Confirmed, Completed, Cancelled] {
            assert!(!Completed.can_transition_to(next));
            assert!(!Cancelled.can_transition_to(next));
        }
    }

    #[test]
    fn test_booking_json_shape() {
        let booking = sample_booking();
        let json = serde_json::to_value(&booking).unwrap();

        assert_eq!(json["serviceType"], "SHARED");
        assert_eq!(json["customerName"], "Juan Pérez");
        assert_eq!(json["date"], "2024-05-01");
        assert_eq!(json["time"], "08:00");
        assert_eq!(json["totalPrice"], "22.00");
        assert_eq!(json["prepaymentAmount"], "8.80");
        assert_eq!(json["status"], "PENDING_PAYMENT");
        // Unset optionals are omitted entirely
        assert!(json.get("driverId").is_none());
        assert!(json.get("paymentProofUrl").is_none());
    }

    #[test]
    fn test_booking_roundtrip() {
        let booking = sample_booking();
        let json = serde_json::to_string(&booking).unwrap();
        let back: Booking = serde_json::from_str(&json).unwrap();

        assert_eq!(back.id, booking.id);
        assert_eq!(back.time, booking.time);
        assert_eq!(back.total_price, booking.total_price);
        assert_eq!(back.status, booking.status);
        assert_eq!(back.driver_id, None);
    }

    #[test]
    fn test_is_active() {
        let mut booking = sample_booking();
        assert!(booking.is_active());
        booking.status = BookingStatus::Cancelled;
        assert!(!booking.is_active());
    }
}
