//! Domain models for the booking service

pub mod booking;
pub mod driver;
pub mod seat;

pub use booking::{Booking, BookingStatus, PickupLocationType, ServiceType};
pub use driver::Driver;
pub use seat::{seat_labels, Seat, SeatKind, CAR_LAYOUT, VEHICLE_CAPACITY};

/// Pickup points served in Jauja for SHARED bookings
pub const KNOWN_POINTS_JAUJA: [&str; 5] = [
    "Plaza de Armas Jauja",
    "Aeropuerto de Jauja",
    "Terminal Terrestre",
    "Laguna de Paca",
    "Ovalo Jauja",
];

/// Fixed drop-off point in Huancayo
pub const DESTINATION_HUANCAYO: &str = "Calle Real y Calixto, Huancayo";
